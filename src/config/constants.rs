//! Application-wide constants
//!
//! Centralized location for defaults and column names.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Production API port
pub const DEFAULT_PRODUCTION_PORT: u16 = 1026;

/// Test-environment API port
pub const DEFAULT_TEST_PORT: u16 = 1027;

/// API documentation port
pub const DEFAULT_DOCS_PORT: u16 = 1028;

// =============================================================================
// Database
// =============================================================================

/// Default database server URL, without credentials or database name
pub const DEFAULT_DB_HOST_URL: &str = "postgres://localhost:5432";

/// Production database name
pub const DEFAULT_PRODUCTION_DATABASE: &str = "lifeguarddb";

/// Production database role
pub const DEFAULT_PRODUCTION_DB_USER: &str = "lifeguard";

/// Test-environment database name
pub const DEFAULT_TEST_DATABASE: &str = "testlifeguarddb";

/// Test-environment database role
pub const DEFAULT_TEST_DB_USER: &str = "testlifeguard";

// =============================================================================
// Tables
// =============================================================================

pub const PRODUCTION_USERS_TABLE: &str = "lifeguardusers";
pub const PRODUCTION_DEVICES_TABLE: &str = "devices";
pub const PRODUCTION_NEIGHBORS_TABLE: &str = "neighbors";

pub const TEST_USERS_TABLE: &str = "testlifeguardusers";
pub const TEST_DEVICES_TABLE: &str = "testdevices";
pub const TEST_NEIGHBORS_TABLE: &str = "testneighbors";

// =============================================================================
// Columns
// =============================================================================

pub const COL_USERNAME: &str = "username";
pub const COL_DEVICE_ID: &str = "deviceid";
pub const COL_IS_HOME: &str = "ishome";
pub const COL_POOL_IS_SUPERVISED: &str = "poolissupervised";
pub const COL_NEIGHBOR_OF: &str = "neighborof";
