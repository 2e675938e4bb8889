//! Authentication service - Registers and verifies credentials.
//!
//! Session handling lives in `session_service`; this service only touches
//! the credential store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Credential, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Digest compared against when the username is unknown, so both failure
/// paths do the same work.
const UNKNOWN_USER_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new credential.
    ///
    /// Fails with `DuplicateCredential` if the username is taken.
    async fn register(&self, username: String, password: String) -> AppResult<Credential>;

    /// Verify a login attempt.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// `AuthenticationFailure`.
    async fn authenticate(&self, username: String, password: String) -> AppResult<()>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, password: String) -> AppResult<Credential> {
        let credential = Credential::new(username, &password);

        match self.uow.credentials().insert(credential).await {
            Ok(credential) => {
                tracing::info!(username = %credential.username, "Credential registered");
                Ok(credential)
            }
            Err(AppError::DuplicateCredential) => {
                tracing::info!("Sign-up rejected: username already taken");
                Err(AppError::DuplicateCredential)
            }
            Err(e) => Err(e),
        }
    }

    async fn authenticate(&self, username: String, password: String) -> AppResult<()> {
        let stored = self.uow.credentials().find_by_username(&username).await?;

        let (password_hash, user_exists) = match &stored {
            Some(credential) => (credential.password_hash.clone(), true),
            None => (UNKNOWN_USER_DIGEST.to_string(), false),
        };

        let password_valid = Password::from_hash(password_hash).verify(&password);

        if !user_exists || !password_valid {
            tracing::info!(username = %username, "Login failed");
            return Err(AppError::AuthenticationFailure);
        }

        tracing::info!(username = %username, "Login succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        CredentialRepository, MockCredentialRepository, MockTableRepository, TableRepository,
    };

    struct TestUnitOfWork {
        credentials: Arc<MockCredentialRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn credentials(&self) -> Arc<dyn CredentialRepository> {
            self.credentials.clone()
        }

        fn tables(&self) -> Arc<dyn TableRepository> {
            Arc::new(MockTableRepository::new())
        }
    }

    fn service(repo: MockCredentialRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork {
            credentials: Arc::new(repo),
        }))
    }

    #[tokio::test]
    async fn test_register_hashes_before_insert() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_insert()
            .withf(|credential| credential.username == "bob" && credential.password_hash != "pw1")
            .returning(Ok);

        let credential = service(repo)
            .register("bob".to_string(), "pw1".to_string())
            .await
            .unwrap();

        assert!(credential.verify("pw1"));
    }

    #[tokio::test]
    async fn test_register_propagates_duplicate() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::DuplicateCredential));

        let result = service(repo)
            .register("bob".to_string(), "pw2".to_string())
            .await;

        assert!(matches!(result, Err(AppError::DuplicateCredential)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_fails() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let result = service(repo)
            .authenticate("ghost".to_string(), "pw".to_string())
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_fails() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(Credential::new(name, "pw1"))));

        let result = service(repo)
            .authenticate("bob".to_string(), "pw2".to_string())
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_correct_password_succeeds() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(Credential::new(name, "pw1"))));

        let result = service(repo)
            .authenticate("bob".to_string(), "pw1".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(AppError::internal("disk on fire")));

        let result = service(repo)
            .authenticate("bob".to_string(), "pw1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
