//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod credential_repository;
pub(crate) mod entities;
mod table_repository;

pub use credential_repository::{CredentialRepository, CredentialStore};
pub use table_repository::{TableRepository, TableStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use table_repository::MockTableRepository;
