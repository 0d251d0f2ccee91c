//! Audit record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Security-relevant actions recorded through the audit sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Successful login.
    Login,
    /// Explicit logout (refresh token cleared).
    Logout,
    /// New account registration.
    Register,
    /// Token pair rotation through the refresh cycle.
    Refresh,
    /// Password changed with the current secret.
    PasswordChange,
    /// Password reset requested.
    ResetRequest,
    /// Password reset completed with a valid reset token.
    ResetComplete,
}

impl AuditAction {
    /// Returns the stable action code stored in the audit trail.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "auth.login",
            Self::Logout => "auth.logout",
            Self::Register => "auth.register",
            Self::Refresh => "auth.refresh",
            Self::PasswordChange => "auth.password_change",
            Self::ResetRequest => "auth.reset_request",
            Self::ResetComplete => "auth.reset_complete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of one security-relevant operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The account that performed (or was the subject of) the action.
    pub actor_id: Uuid,
    /// The action performed.
    pub action: AuditAction,
    /// The type of entity acted on (e.g. `"account"`).
    pub entity_name: String,
    /// The identifier of the entity acted on.
    pub entity_id: String,
    /// Serialized prior state, when the action replaced something.
    pub old_value: Option<serde_json::Value>,
    /// Serialized new state, when the action produced something.
    pub new_value: Option<serde_json::Value>,
    /// Network address the request originated from.
    pub source_address: Option<String>,
    /// Client agent string.
    pub agent: Option<String>,
    /// When the action occurred.
    pub occurred_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Builds a record for an account-scoped action with no value diff.
    pub fn for_account(actor_id: Uuid, action: AuditAction) -> Self {
        Self {
            actor_id,
            action,
            entity_name: "account".to_string(),
            entity_id: actor_id.to_string(),
            old_value: None,
            new_value: None,
            source_address: None,
            agent: None,
            occurred_at: Utc::now(),
        }
    }

    /// Attaches request origin metadata.
    pub fn with_origin(mut self, source_address: Option<String>, agent: Option<String>) -> Self {
        self.source_address = source_address;
        self.agent = agent;
        self
    }
}
