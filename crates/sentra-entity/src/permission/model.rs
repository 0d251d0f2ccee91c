//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fine-grained authorizable action, identified by a stable code.
///
/// Permissions are immutable once resolved into a token; the claims snapshot
/// taken at issuance time is what the gate decides on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Stable, unique code (e.g. `"users.view"`). Matched
    /// case-insensitively by the access gate.
    pub code: String,
    /// Grouping label for administration UIs.
    pub group: String,
    /// Human-readable description.
    pub description: String,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
}
