//! Argon2id secret hashing and verification.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};

use sentra_core::error::AppError;

/// Hashes and verifies account secrets with Argon2id.
///
/// Output is a PHC string carrying algorithm, parameters, and salt, so
/// stored hashes stay verifiable across parameter upgrades. Comparison is
/// salted and constant-time; a mismatch is a normal `Ok(false)`, while an
/// unparseable stored hash is an internal failure, never a credential
/// rejection.
#[derive(Debug, Clone, Default)]
pub struct SecretHasher;

impl SecretHasher {
    /// Creates a new secret hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext secret with a freshly generated random salt.
    pub fn hash_secret(&self, secret: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Could not hash secret: {e}")))
    }

    /// Checks a plaintext secret against a stored PHC hash string.
    pub fn verify_secret(&self, secret: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            AppError::internal(format!("Stored secret hash is not a valid PHC string: {e}"))
        })?;

        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Argon2 verification failed: {e}"))),
        }
    }
}
