//! Session state for one user-facing interaction.

use serde::Serialize;

/// Authentication status of a single interaction context.
///
/// A fresh session is unauthenticated with no username. `start` and `end`
/// are the only transitions; a session is never shared across users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    authenticated: bool,
    username: Option<String>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as authenticated for `username`.
    pub fn start(&mut self, username: impl Into<String>) {
        self.authenticated = true;
        self.username = Some(username.into());
    }

    /// Reset to the initial unauthenticated state.
    pub fn end(&mut self) {
        *self = Self::new();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
