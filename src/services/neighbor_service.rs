//! Neighbor service

use async_trait::async_trait;

use crate::domain::Neighbor;
use crate::errors::{AppResult, StorageContext};
use crate::infra::{ConnectionProvider, KeyedTable, TableLocation};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NeighborService: Send + Sync {
    /// Record that `neighbor.username` watches the pool of `neighbor.neighbor_of`
    async fn add_neighbor(&self, neighbor: Neighbor) -> AppResult<Neighbor>;

    async fn get_neighbor(&self, username: &str) -> AppResult<Option<Neighbor>>;

    async fn list_neighbors(&self) -> AppResult<Vec<Neighbor>>;

    /// Remove a neighbor (no-op when absent)
    async fn remove_neighbor(&self, username: &str) -> AppResult<()>;
}

pub struct NeighborManager {
    provider: ConnectionProvider,
    neighbors: KeyedTable<Neighbor>,
}

impl NeighborManager {
    pub fn new(provider: ConnectionProvider, database: &str, table: &str) -> AppResult<Self> {
        let neighbors = KeyedTable::new(&provider, TableLocation::new(database, table))?;
        Ok(Self {
            provider,
            neighbors,
        })
    }
}

#[async_trait]
impl NeighborService for NeighborManager {
    async fn add_neighbor(&self, neighbor: Neighbor) -> AppResult<Neighbor> {
        const CONTEXT: &str = "adding neighbor error";

        let session = self.provider.session().await.context(CONTEXT)?;
        self.neighbors
            .insert(&session, &neighbor)
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;

        tracing::info!(
            username = %neighbor.username,
            neighbor_of = %neighbor.neighbor_of,
            "Neighbor added"
        );
        Ok(neighbor)
    }

    async fn get_neighbor(&self, username: &str) -> AppResult<Option<Neighbor>> {
        const CONTEXT: &str = "getneighbor error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let neighbor = self
            .neighbors
            .find(&session, username.to_string())
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(neighbor)
    }

    async fn list_neighbors(&self) -> AppResult<Vec<Neighbor>> {
        const CONTEXT: &str = "listing neighbors error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let neighbors = self.neighbors.list(&session).await.context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(neighbors)
    }

    async fn remove_neighbor(&self, username: &str) -> AppResult<()> {
        const CONTEXT: &str = "removing neighbor error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let removed = self
            .neighbors
            .delete(&session, username.to_string())
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;

        tracing::info!(username = %username, removed, "Neighbor removal processed");
        Ok(())
    }
}
