//! Access-token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind as JwtErrorKind};

use sentra_core::config::auth::AuthConfig;
use sentra_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Validates signed access tokens against the configured key, issuer, and
/// audience.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Full validation: signature, expiry, issuer, audience.
    validation: Validation,
    /// Same checks with expiry validation disabled, used only by the
    /// refresh cycle to read claims out of an expired token.
    expired_ok_validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        let mut expired_ok_validation = validation.clone();
        expired_ok_validation.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.signing_key.as_bytes()),
            validation,
            expired_ok_validation,
        }
    }

    /// Decodes and fully validates an access token string.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_with(token, &self.validation)
    }

    /// Decodes an access token while ignoring its expiry.
    ///
    /// This is the one place expired tokens are accepted for parsing;
    /// signature, issuer, and audience checks still apply.
    pub fn parse_allowing_expired(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_with(token, &self.expired_ok_validation)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => {
                        AppError::new(ErrorKind::TokenExpired, "Token has expired")
                    }
                    JwtErrorKind::InvalidSignature => {
                        AppError::new(ErrorKind::TokenSignatureInvalid, "Invalid token signature")
                    }
                    JwtErrorKind::InvalidIssuer => {
                        AppError::new(ErrorKind::TokenIssuerMismatch, "Invalid token issuer")
                    }
                    JwtErrorKind::InvalidAudience => {
                        AppError::new(ErrorKind::TokenAudienceMismatch, "Invalid token audience")
                    }
                    _ => AppError::token_malformed(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
