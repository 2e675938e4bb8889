//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - The server-side session registry
//! - Trained model artifact loading
//! - Unit of Work for repository access

pub mod db;
pub mod model;
pub mod repositories;
pub mod sessions;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use model::LinearPipeline;
pub use repositories::{CredentialRepository, CredentialStore, TableRepository, TableStore};
pub use sessions::{MemorySessionStore, SessionStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCredentialRepository, MockTableRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use sessions::MockSessionStore;
