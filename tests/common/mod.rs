//! Shared setup for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use sales_dashboard::config::Config;
use sales_dashboard::infra::Database;

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Pipeline artifact shipped with the crate.
pub fn shipped_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/sales_pipeline.json")
}

/// Config pointing at a private in-memory database.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub fn memory_config() -> Config {
    Config::new("sqlite::memory:", SECRET)
        .expect("valid test config")
        .with_max_connections(1)
        .with_model_path(shipped_model())
}

/// Connect and migrate a fresh in-memory database.
pub async fn memory_database(config: &Config) -> Arc<Database> {
    Arc::new(
        Database::connect(config)
            .await
            .expect("in-memory database should connect"),
    )
}
