//! Signed token issuance with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::TryRngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use sentra_core::config::auth::AuthConfig;
use sentra_core::error::AppError;
use sentra_entity::account::Account;

use super::claims::Claims;

/// Entropy of an opaque refresh token in bytes (512 bits).
const REFRESH_TOKEN_BYTES: usize = 64;

/// Creates signed HS256 access tokens and opaque refresh tokens.
///
/// Access and refresh issuance always happen as a pair; the caller persists
/// the refresh token against the account in the same operation.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Value written into the `iss` claim.
    issuer: String,
    /// Value written into the `aud` claim.
    audience: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// A freshly signed access token and its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedAccessToken {
    /// The signed, self-contained token string.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.signing_key.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_minutes: config.access_token_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_token_ttl_days as i64,
        }
    }

    /// Signs a new access token embedding the account's identity and its
    /// role/permission snapshot.
    pub fn issue_access_token(
        &self,
        account: &Account,
        roles: Vec<String>,
        permissions: Vec<String>,
    ) -> Result<IssuedAccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            name: account.full_name(),
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            roles,
            permissions,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedAccessToken { token, expires_at })
    }

    /// Generates an opaque refresh token: 64 bytes from the OS random
    /// source, base64-encoded.
    pub fn issue_refresh_token(&self) -> Result<String, AppError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::internal(format!("Random source unavailable: {e}")))?;
        Ok(BASE64.encode(bytes))
    }

    /// Returns the expiry for a refresh token issued now.
    pub fn refresh_expiry(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::days(self.refresh_ttl_days)
    }
}
