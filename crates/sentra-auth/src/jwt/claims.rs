//! Access-token claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every access token.
///
/// Validated once at parse time; callers use the named accessors instead of
/// scanning a claims collection for magic strings. The role and permission
/// claims are a snapshot taken at issuance — they are not live-revocable
/// during the token's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Token ID, unique per issuance.
    pub jti: Uuid,
    /// Issuing party.
    pub iss: String,
    /// Intended audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Names of the roles assigned at issuance time.
    pub roles: Vec<String>,
    /// Permission codes resolved at issuance time.
    pub permissions: Vec<String>,
}

impl Claims {
    /// Returns the account ID from the subject claim.
    pub fn account_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks whether the claims carry the given role name
    /// (case-insensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Checks whether the claims carry the given permission code
    /// (case-insensitive exact match).
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p.eq_ignore_ascii_case(code))
    }
}
