//! Password digests and token material
//!
//! Passwords are stored as hex-encoded SHA-256 over a per-user random salt
//! concatenated with the password. Tokens are 64 hex characters of digest
//! output over fresh UUID material.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Compute the stored digest for a password under the given salt.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a fresh random salt.
pub fn generate_salt() -> String {
    hex::encode(Uuid::new_v4().as_bytes())
}

/// Generate a fresh API token (64 hex characters).
pub fn generate_token() -> String {
    let mut hasher = Sha256::new();
    hasher.update(Uuid::new_v4().as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-shape comparison of a candidate password against stored
/// credentials.
pub fn verify_password(salt: &str, stored_hash: &str, candidate: &str) -> bool {
    hash_password(salt, candidate) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        assert_eq!(hash_password(&salt, "demo"), hash_password(&salt, "demo"));
    }

    #[test]
    fn test_different_salts_differ() {
        let a = hash_password(&generate_salt(), "demo");
        let b = hash_password(&generate_salt(), "demo");
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_round_trip() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "secret");
        assert!(verify_password(&salt, &hash, "secret"));
        assert!(!verify_password(&salt, &hash, "wrong"));
    }

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
