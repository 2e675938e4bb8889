//! Unit of Work - centralized repository access over one connection pool.
//!
//! The pool is acquired once at startup and passed in explicitly; every
//! repository handed out shares it. Writes commit per statement.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{CredentialRepository, CredentialStore, TableRepository, TableStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get credential repository
    fn credentials(&self) -> Arc<dyn CredentialRepository>;

    /// Get table browser repository
    fn tables(&self) -> Arc<dyn TableRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    credential_repo: Arc<CredentialStore>,
    table_repo: Arc<TableStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            credential_repo: Arc::new(CredentialStore::new(db.clone())),
            table_repo: Arc::new(TableStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.credential_repo.clone()
    }

    fn tables(&self) -> Arc<dyn TableRepository> {
        self.table_repo.clone()
    }
}
