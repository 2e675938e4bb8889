//! Session service - Starts, resolves and ends interaction sessions.
//!
//! Each successful login or sign-up starts a fresh `Session` stored under a
//! new id. The client holds a signed token naming that id; the server-side
//! entry is the source of truth, so ending it invalidates the token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::Session;
use crate::errors::{AppError, AppResult};
use crate::infra::SessionStore;

/// Session token claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username
    pub sub: String,
    /// Server-side session id
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned after a session is started
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionToken {
    /// Signed session token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 43200)]
    pub expires_in: i64,
}

/// Authenticated session attached to a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentSession {
    pub session_id: Uuid,
    pub username: String,
}

/// Session service trait for dependency injection.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Start a new authenticated session for `username`
    async fn start(&self, username: &str) -> AppResult<SessionToken>;

    /// Resolve a token to its live, authenticated session
    async fn resolve(&self, token: &str) -> AppResult<CurrentSession>;

    /// End a session. Unknown ids are ignored.
    async fn end(&self, session_id: Uuid) -> AppResult<()>;

    /// Drop expired sessions, returning how many were removed
    async fn purge_expired(&self) -> usize;

    /// Number of stored sessions
    async fn active_count(&self) -> usize;
}

/// Concrete implementation of SessionService
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: Config,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: Config) -> Self {
        Self { store, config }
    }

    fn issue_token(&self, username: &str, session_id: Uuid) -> AppResult<SessionToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.session_expiration_hours);

        let claims = SessionClaims {
            sub: username.to_string(),
            sid: session_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(SessionToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.session_expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn start(&self, username: &str) -> AppResult<SessionToken> {
        let session_id = Uuid::new_v4();
        let mut session = Session::new();
        session.start(username);

        let token = self.issue_token(username, session_id)?;
        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        self.store.insert(session_id, session, expires_at).await;

        tracing::debug!(%session_id, username, "Session started");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> AppResult<CurrentSession> {
        let claims = self.verify_token(token)?;

        let session = self
            .store
            .get(claims.sid)
            .await
            .ok_or(AppError::Unauthorized)?;

        match session.username() {
            Some(username) if session.is_authenticated() && username == claims.sub => {
                Ok(CurrentSession {
                    session_id: claims.sid,
                    username: username.to_string(),
                })
            }
            _ => Err(AppError::Unauthorized),
        }
    }

    async fn end(&self, session_id: Uuid) -> AppResult<()> {
        if let Some(session) = self.store.remove(session_id).await {
            tracing::info!(%session_id, username = ?session.username(), "Session ended");
        }
        Ok(())
    }

    async fn purge_expired(&self) -> usize {
        self.store.purge_expired().await
    }

    async fn active_count(&self) -> usize {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MemorySessionStore, MockSessionStore};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn manager() -> SessionManager {
        let config = Config::new("sqlite::memory:", SECRET).unwrap();
        SessionManager::new(Arc::new(MemorySessionStore::new()), config)
    }

    #[tokio::test]
    async fn test_start_then_resolve() {
        let sessions = manager();
        let token = sessions.start("alice").await.unwrap();

        let current = sessions.resolve(&token.access_token).await.unwrap();
        assert_eq!(current.username, "alice");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(sessions.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_end_invalidates_token() {
        let sessions = manager();
        let token = sessions.start("alice").await.unwrap();
        let current = sessions.resolve(&token.access_token).await.unwrap();

        sessions.end(current.session_id).await.unwrap();

        assert!(matches!(
            sessions.resolve(&token.access_token).await,
            Err(AppError::Unauthorized)
        ));
        assert_eq!(sessions.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_each_start_gets_its_own_session() {
        let sessions = manager();
        let alice = sessions.start("alice").await.unwrap();
        let bob = sessions.start("bob").await.unwrap();

        let alice_session = sessions.resolve(&alice.access_token).await.unwrap();
        sessions.end(alice_session.session_id).await.unwrap();

        let bob_session = sessions.resolve(&bob.access_token).await.unwrap();
        assert_eq!(bob_session.username, "bob");
    }

    #[tokio::test]
    async fn test_end_removes_entry_without_storing_it_again() {
        let session_id = Uuid::new_v4();
        let mut store = MockSessionStore::new();
        store
            .expect_remove()
            .withf(move |id| *id == session_id)
            .times(1)
            .returning(|_| {
                let mut session = Session::new();
                session.start("alice");
                Some(session)
            });
        store.expect_insert().never();

        let config = Config::new("sqlite::memory:", SECRET).unwrap();
        let sessions = SessionManager::new(Arc::new(store), config);

        assert!(sessions.end(session_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_end_unknown_session_is_noop() {
        let sessions = manager();
        assert!(sessions.end(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let sessions = manager();
        assert!(matches!(
            sessions.resolve("not-a-token").await,
            Err(AppError::Jwt(_))
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_rejected() {
        let sessions = manager();
        let other = SessionManager::new(
            Arc::new(MemorySessionStore::new()),
            Config::new("sqlite::memory:", "another-secret-key-for-tests-32chars!").unwrap(),
        );
        let token = other.start("mallory").await.unwrap();

        assert!(sessions.resolve(&token.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_unauthenticated_stored_session_rejected() {
        let mut store = MockSessionStore::new();
        store.expect_insert().returning(|_, _, _| ());
        store.expect_get().returning(|_| Some(Session::new()));

        let config = Config::new("sqlite::memory:", SECRET).unwrap();
        let sessions = SessionManager::new(Arc::new(store), config);
        let token = sessions.start("alice").await.unwrap();

        assert!(matches!(
            sessions.resolve(&token.access_token).await,
            Err(AppError::Unauthorized)
        ));
    }
}
