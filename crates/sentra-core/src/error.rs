//! Unified application error types for Sentra.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Security-relevant rejections are
//! always returned as typed results, never raised as panics, and callers
//! pattern-match on [`ErrorKind`] rather than parsing messages.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the engine.
///
/// The credential and token kinds mirror the engine's rejection taxonomy:
/// bad identifier and bad secret are merged into `InvalidCredentials` so a
/// caller cannot distinguish which factor failed, while the authorization
/// kinds (`Unauthenticated` vs `PermissionDenied`) stay distinct because
/// that distinction does not aid account enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Unknown identifier or wrong secret (deliberately merged).
    InvalidCredentials,
    /// The account exists but is not allowed to authenticate.
    AccountDisabled,
    /// The token could not be parsed into a valid claim structure.
    TokenMalformed,
    /// The token signature does not verify against the configured key.
    TokenSignatureInvalid,
    /// The token's expiry timestamp has passed.
    TokenExpired,
    /// The token's `iss` claim does not match the configured issuer.
    TokenIssuerMismatch,
    /// The token's `aud` claim does not match the configured audience.
    TokenAudienceMismatch,
    /// The supplied refresh token is not the one currently stored.
    RefreshTokenMismatch,
    /// The stored refresh token has passed its expiry.
    RefreshTokenExpired,
    /// The principal is authenticated but lacks the required permission.
    PermissionDenied,
    /// No valid claim set accompanies the request.
    Unauthenticated,
    /// The requested entity was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification).
    Conflict,
    /// The persistence collaborator failed.
    Store,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An unexpected internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::AccountDisabled => write!(f, "ACCOUNT_DISABLED"),
            Self::TokenMalformed => write!(f, "TOKEN_MALFORMED"),
            Self::TokenSignatureInvalid => write!(f, "TOKEN_SIGNATURE_INVALID"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenIssuerMismatch => write!(f, "TOKEN_ISSUER_MISMATCH"),
            Self::TokenAudienceMismatch => write!(f, "TOKEN_AUDIENCE_MISMATCH"),
            Self::RefreshTokenMismatch => write!(f, "REFRESH_TOKEN_MISMATCH"),
            Self::RefreshTokenExpired => write!(f, "REFRESH_TOKEN_EXPIRED"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Sentra.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire engine boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create the generic invalid-credentials rejection.
    ///
    /// Always the same message regardless of which factor failed, so the
    /// result shape cannot be used to enumerate accounts.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// Create an account-disabled rejection.
    pub fn account_disabled() -> Self {
        Self::new(ErrorKind::AccountDisabled, "Account is disabled")
    }

    /// Create a token-malformed rejection.
    pub fn token_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenMalformed, message)
    }

    /// Create a refresh-token-mismatch rejection.
    pub fn refresh_token_mismatch() -> Self {
        Self::new(ErrorKind::RefreshTokenMismatch, "Invalid refresh token")
    }

    /// Create a refresh-token-expired rejection.
    pub fn refresh_token_expired() -> Self {
        Self::new(ErrorKind::RefreshTokenExpired, "Refresh token has expired")
    }

    /// Create a permission-denied rejection.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Create an unauthenticated rejection.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a persistence-collaborator error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
