//! Server-side session registry.
//!
//! Maps a session id to the `Session` owned by one interaction context.
//! Entries carry an expiry; expired entries are invisible to `get` and are
//! dropped by `purge_expired`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::Session;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under a fresh id
    async fn insert(&self, id: Uuid, session: Session, expires_at: DateTime<Utc>);

    /// Fetch a live session
    async fn get(&self, id: Uuid) -> Option<Session>;

    /// Remove a session, returning it if it was present
    async fn remove(&self, id: Uuid) -> Option<Session>;

    /// Drop expired sessions, returning how many were removed
    async fn purge_expired(&self) -> usize;

    /// Number of stored sessions
    async fn count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct SessionEntry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, id: Uuid, session: Session, expires_at: DateTime<Utc>) {
        self.sessions
            .write()
            .await
            .insert(id, SessionEntry { session, expires_at });
    }

    async fn get(&self, id: Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.session.clone())
    }

    async fn remove(&self, id: Uuid) -> Option<Session> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|entry| entry.session)
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn started(username: &str) -> Session {
        let mut session = Session::new();
        session.start(username);
        session
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = MemorySessionStore::new();
        let id = Uuid::new_v4();
        store
            .insert(id, started("alice"), Utc::now() + Duration::hours(1))
            .await;

        let session = store.get(id).await.unwrap();
        assert_eq!(session.username(), Some("alice"));

        assert!(store.remove(id).await.is_some());
        assert!(store.get(id).await.is_none());
        assert!(store.remove(id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_id() {
        let store = MemorySessionStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let expires = Utc::now() + Duration::hours(1);
        store.insert(a, started("alice"), expires).await;
        store.insert(b, started("bob"), expires).await;

        store.remove(a).await;

        assert!(store.get(a).await.is_none());
        assert_eq!(store.get(b).await.unwrap().username(), Some("bob"));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_hidden_and_purged() {
        let store = MemorySessionStore::new();
        let expired = Uuid::new_v4();
        let live = Uuid::new_v4();
        store
            .insert(expired, started("alice"), Utc::now() - Duration::seconds(1))
            .await;
        store
            .insert(live, started("bob"), Utc::now() + Duration::hours(1))
            .await;

        assert!(store.get(expired).await.is_none());
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.count().await, 1);
    }
}
