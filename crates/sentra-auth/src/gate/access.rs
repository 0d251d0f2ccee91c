//! Allow/Deny decisions over token claims.

use serde::{Deserialize, Serialize};

use sentra_core::config::auth::AuthConfig;
use sentra_core::error::AppError;

use crate::jwt::Claims;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No valid claim set accompanied the request.
    Unauthenticated,
    /// The claims carry no matching permission code.
    PermissionDenied,
}

/// The outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The request may proceed.
    Allow,
    /// The request is rejected.
    Deny(DenyReason),
}

impl Decision {
    /// Returns `true` for `Allow`.
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether a principal's claims satisfy a required permission.
///
/// This is a pure function over the supplied claim set: no I/O, no locks,
/// safe for unbounded concurrent invocation.
///
/// Decision order:
/// 1. no claims → `Deny(Unauthenticated)`
/// 2. administrator role present and the bypass policy is enabled → `Allow`
/// 3. exact, case-insensitive permission-code match → `Allow`, else
///    `Deny(PermissionDenied)`
///
/// The administrator bypass is a single explicit policy flag; with it
/// disabled, administrators are subject to the same per-permission check
/// as everyone else.
#[derive(Debug, Clone)]
pub struct AccessGate {
    /// Role name that triggers the bypass.
    admin_role: String,
    /// Whether the bypass is in effect.
    admin_bypass_enabled: bool,
}

impl AccessGate {
    /// Creates a new gate from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            admin_role: config.admin_role.clone(),
            admin_bypass_enabled: config.admin_bypass_enabled,
        }
    }

    /// Evaluates the decision policy for the given claims and required
    /// permission code.
    pub fn authorize(&self, claims: Option<&Claims>, required_permission: &str) -> Decision {
        let Some(claims) = claims else {
            return Decision::Deny(DenyReason::Unauthenticated);
        };

        if self.admin_bypass_enabled && claims.has_role(&self.admin_role) {
            return Decision::Allow;
        }

        if claims.has_permission(required_permission) {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::PermissionDenied)
        }
    }

    /// Like [`authorize`](Self::authorize), but maps denial onto the error
    /// taxonomy for callers that propagate with `?`.
    pub fn require(&self, claims: Option<&Claims>, required_permission: &str) -> Result<(), AppError> {
        match self.authorize(claims, required_permission) {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => {
                Err(AppError::unauthenticated("Authentication required"))
            }
            Decision::Deny(DenyReason::PermissionDenied) => Err(AppError::permission_denied(
                format!("Missing required permission '{required_permission}'"),
            )),
        }
    }
}
