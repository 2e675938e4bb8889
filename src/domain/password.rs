//! Password value object - Domain layer password handling.
//!
//! Passwords are stored as the lowercase hex SHA-256 digest of their UTF-8
//! bytes. The digest is deterministic, so the same password always maps to
//! the same stored value.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Password value object that handles hashing and verification.
///
/// Holds only the digest; the plaintext never leaves `new`/`verify`.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// No strength rules are applied.
    pub fn new(plain_text: &str) -> Self {
        Self {
            hash: Self::digest(plain_text),
        }
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// The comparison runs in constant time over the digest bytes.
    pub fn verify(&self, plain_text: &str) -> bool {
        let candidate = Self::digest(plain_text);
        candidate.as_bytes().ct_eq(self.hash.as_bytes()).into()
    }

    /// Hex-encoded SHA-256 of the password bytes.
    fn digest(plain_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plain_text.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash.as_bytes().ct_eq(other.hash.as_bytes()).into()
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain);

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_hashing_is_deterministic() {
        let pass1 = Password::new("SamePassword123");
        let pass2 = Password::new("SamePassword123");

        assert_eq!(pass1.as_str(), pass2.as_str());
        assert_eq!(pass1, pass2);
    }

    #[test]
    fn test_different_passwords_different_hashes() {
        let pass1 = Password::new("Password123!");
        let pass2 = Password::new("Password456!");

        assert_ne!(pass1.as_str(), pass2.as_str());
    }

    #[test]
    fn test_digest_never_equals_plaintext() {
        for plain in ["", "pw1", "hunter2", "0123456789abcdef"] {
            let password = Password::new(plain);
            assert_ne!(password.as_str(), plain);
            assert_eq!(password.as_str().len(), 64);
        }
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        assert_eq!(
            Password::new("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_rejects_truncated_hash() {
        let password = Password::new("pw1");
        let truncated = Password::from_hash(password.as_str()[..32].to_string());

        assert!(!truncated.verify("pw1"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("pw1");
        let debug = format!("{:?}", password);

        assert!(!debug.contains(password.as_str()));
    }
}
