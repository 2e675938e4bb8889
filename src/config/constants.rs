//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of rows per page in the table browser
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Maximum allowed rows per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 500;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Sessions
// =============================================================================

/// Default session token lifetime in hours
pub const DEFAULT_SESSION_EXPIRATION_HOURS: i64 = 12;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// How often expired sessions are purged from the registry
pub const SESSION_PURGE_INTERVAL_SECS: u64 = 300;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Session token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sqlite.db?mode=rwc";

/// Default connection pool size
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Name of the credential table
pub const CREDENTIALS_TABLE: &str = "users";

/// Tables never shown in the table browser
pub const HIDDEN_TABLES: &[&str] = &[CREDENTIALS_TABLE, "seaql_migrations"];

// =============================================================================
// Prediction model
// =============================================================================

/// Default location of the trained pipeline artifact
pub const DEFAULT_MODEL_PATH: &str = "models/sales_pipeline.json";
