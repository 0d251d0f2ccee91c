//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account in the Sentra system.
///
/// The secret hash is an Argon2id PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address, unique case-insensitively. Doubles as the login
    /// identifier.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2id secret hash.
    #[serde(skip_serializing)]
    pub secret_hash: String,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// The currently live refresh token, if any. At most one per account.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the stored refresh token expires.
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// SHA-256 digest of the outstanding password-reset token, if any.
    #[serde(skip_serializing)]
    pub reset_token_digest: Option<String>,
    /// When the outstanding reset token expires.
    pub reset_token_expires_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Returns the display name embedded in token claims.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data required to register a new account.
///
/// The secret arrives pre-hashed; the engine never hands plaintext secrets
/// to the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address (also the login identifier).
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Pre-hashed secret.
    pub secret_hash: String,
    /// Name of the role to assign on creation.
    pub initial_role: String,
}
