//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named bundle of permission grants assignable to accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name (e.g. `"Editor"`).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// System roles are read-only for the engine; mutation is owned by the
    /// surrounding CRUD services.
    pub is_system: bool,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}
