//! Authentication and token configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Minimum recommended HMAC key length in bytes (256 bits).
const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Authentication, token, and access-gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HMAC-SHA256 token signing and verification.
    pub signing_key: String,
    /// Expected `iss` claim value.
    pub issuer: String,
    /// Expected `aud` claim value.
    pub audience: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Password-reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: u64,
    /// Name of the role whose presence triggers the gate's full bypass.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Whether the administrator role bypasses per-permission checks.
    #[serde(default = "default_true")]
    pub admin_bypass_enabled: bool,
    /// Role assigned to newly registered accounts.
    #[serde(default = "default_registration_role")]
    pub default_registration_role: String,
}

impl AuthConfig {
    /// Validates the configuration at load time.
    ///
    /// An empty signing key is a hard failure; a key shorter than 256 bits
    /// is accepted with a warning.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.signing_key.is_empty() {
            return Err(AppError::configuration("Signing key must not be empty"));
        }
        if self.signing_key.len() < MIN_SIGNING_KEY_BYTES {
            warn!(
                key_bytes = self.signing_key.len(),
                "Signing key is shorter than the recommended 32 bytes"
            );
        }
        if self.access_token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "Access token TTL must be at least one minute",
            ));
        }
        if self.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration(
                "Refresh token TTL must be at least one day",
            ));
        }
        Ok(())
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_reset_ttl() -> u64 {
    60
}

fn default_admin_role() -> String {
    "Admin".to_string()
}

fn default_registration_role() -> String {
    "User".to_string()
}

fn default_true() -> bool {
    true
}
