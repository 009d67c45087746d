//! Password hashing
//!
//! Passwords are never stored or compared in plain form: they go through
//! Argon2id with a random salt, producing a PHC string that embeds the
//! algorithm, parameters and salt.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id with secure defaults.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `false` for a wrong password; errors only on a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Password verification failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_argon2id() {
        let hash = hash_password("secret").expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("secret").expect("Failed to hash password");
        let hash2 = hash_password("secret").expect("Failed to hash password");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("secret").expect("Failed to hash password");

        assert!(verify_password("secret", &hash).expect("Verification errored"));
        assert!(!verify_password("wrong", &hash).expect("Verification errored"));
    }

    #[test]
    fn test_verify_invalid_hash_errors() {
        assert!(verify_password("secret", "not-a-hash").is_err());
    }
}
