//! Device service - Pairs pool devices with users.

use async_trait::async_trait;
use sea_orm::Value;

use crate::config::{COL_DEVICE_ID, COL_USERNAME};
use crate::domain::{parse_device_id, Device, User};
use crate::errors::{AppResult, StorageContext};
use crate::infra::{ConnectionProvider, KeyedTable, TableLocation};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Device service trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Pair a device with its user.
    ///
    /// Re-onboarding a username replaces its device id. The user row must
    /// already exist; its `deviceID` is updated in the same session.
    async fn onboard_device(&self, device: Device) -> AppResult<()>;

    /// Remove a device by id (no-op when absent)
    async fn remove_device(&self, device_id: i64) -> AppResult<()>;

    /// Look up a device by its textual id.
    ///
    /// A non-numeric id fails with `MalformedInput` before storage is touched.
    async fn get_device(&self, device_id: &str) -> AppResult<Option<Device>>;

    /// Every user known to the device table, flags defaulting to false
    async fn get_all_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of DeviceService
pub struct DeviceManager {
    provider: ConnectionProvider,
    devices: KeyedTable<Device>,
    users: KeyedTable<User>,
}

impl DeviceManager {
    pub fn new(
        provider: ConnectionProvider,
        database: &str,
        devices_table: &str,
        users_table: &str,
    ) -> AppResult<Self> {
        let devices = KeyedTable::new(&provider, TableLocation::new(database, devices_table))?;
        let users = KeyedTable::new(&provider, TableLocation::new(database, users_table))?;
        Ok(Self {
            provider,
            devices,
            users,
        })
    }
}

#[async_trait]
impl DeviceService for DeviceManager {
    async fn onboard_device(&self, device: Device) -> AppResult<()> {
        const CONTEXT: &str = "onboarding device error";

        let session = self.provider.session().await.context(CONTEXT)?;

        self.devices
            .insert_or_ignore(&session, &device, COL_USERNAME)
            .await
            .context(CONTEXT)?;

        self.devices
            .update_by(
                &session,
                COL_USERNAME,
                device.username.clone().into(),
                vec![(COL_DEVICE_ID, device.device_id.into())],
            )
            .await
            .context(CONTEXT)?;

        let owners = self
            .users
            .update(
                &session,
                device.username.clone(),
                vec![(COL_DEVICE_ID, device.device_id.into())],
            )
            .await
            .context(CONTEXT)?;
        if owners == 0 {
            tracing::warn!(
                username = %device.username,
                table = %self.users.location(),
                "Onboarded device has no user row"
            );
        }

        session.commit().await.context(CONTEXT)?;

        tracing::info!(
            username = %device.username,
            device_id = device.device_id,
            "Device onboarded"
        );
        Ok(())
    }

    async fn remove_device(&self, device_id: i64) -> AppResult<()> {
        const CONTEXT: &str = "removing device error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let removed = self
            .devices
            .delete(&session, device_id)
            .await
            .context(CONTEXT)?;
        if removed > 0 {
            self.users
                .update_by(
                    &session,
                    COL_DEVICE_ID,
                    device_id.into(),
                    vec![(COL_DEVICE_ID, Value::BigInt(None))],
                )
                .await
                .context(CONTEXT)?;
        }
        session.commit().await.context(CONTEXT)?;

        tracing::info!(device_id, removed, "Device removal processed");
        Ok(())
    }

    async fn get_device(&self, device_id: &str) -> AppResult<Option<Device>> {
        const CONTEXT: &str = "getdevice error";

        let id = parse_device_id(device_id)?;

        let session = self.provider.session().await.context(CONTEXT)?;
        let device = self.devices.find(&session, id).await.context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(device)
    }

    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        const CONTEXT: &str = "getalluser error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let users = self
            .devices
            .scan::<User>(&session)
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(users)
    }
}
