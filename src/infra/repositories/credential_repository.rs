//! Credential repository implementation.
//!
//! Insert and lookup only: credentials are never updated or deleted.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};

use super::entities::credential::{ActiveModel, Entity as CredentialEntity};
use crate::domain::Credential;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find a credential by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>>;

    /// Insert a new credential.
    ///
    /// Returns `DuplicateCredential` when the username is already taken;
    /// the existing row is left untouched.
    async fn insert(&self, credential: Credential) -> AppResult<Credential>;
}

/// Concrete implementation of CredentialRepository
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialRepository for CredentialStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let result = CredentialEntity::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Credential::from))
    }

    async fn insert(&self, credential: Credential) -> AppResult<Credential> {
        let active_model = ActiveModel {
            username: Set(credential.username.clone()),
            password: Set(credential.password_hash.clone()),
        };

        // The primary key is the only arbiter of uniqueness, so concurrent
        // sign-ups for one username resolve to exactly one success.
        CredentialEntity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateCredential
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(credential)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("UNIQUE constraint failed")
}
