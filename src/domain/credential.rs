//! Credential domain entity.

use serde::{Deserialize, Serialize};

use super::Password;

/// Stored credential: a username and the digest of its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Credential {
    /// Build a credential from a plaintext password.
    pub fn new(username: impl Into<String>, plain_password: &str) -> Self {
        Self {
            username: username.into(),
            password_hash: Password::new(plain_password).into_string(),
        }
    }

    /// Check a plaintext password against the stored digest.
    pub fn verify(&self, plain_password: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_password)
    }
}
