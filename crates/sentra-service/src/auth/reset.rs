//! Password-reset token generation and digesting.
//!
//! Only the SHA-256 digest of a reset token is ever stored; the cleartext
//! token travels to the account holder through the notifier and comes back
//! once, on completion.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use sentra_core::error::AppError;

/// Entropy of a reset token in bytes (256 bits).
const RESET_TOKEN_BYTES: usize = 32;

/// Generates a fresh reset token, returning `(cleartext, digest)`.
pub fn generate() -> Result<(String, String), AppError> {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::internal(format!("Random source unavailable: {e}")))?;
    let token = URL_SAFE_NO_PAD.encode(bytes);
    let token_digest = digest(&token);
    Ok((token, token_digest))
}

/// Computes the storable digest of a reset token.
pub fn digest(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}
