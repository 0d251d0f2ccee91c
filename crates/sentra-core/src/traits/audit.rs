//! Audit trail collaborator trait.

use async_trait::async_trait;

use sentra_entity::audit::AuditRecord;

use crate::result::AppResult;

/// Append-only sink for security-relevant operation records.
///
/// The engine guarantees that `record` is called after the state change it
/// describes, and that a sink failure never rolls back that state change.
/// Implementations own persistence, batching, and retention.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Appends one record to the audit trail.
    async fn record(&self, record: AuditRecord) -> AppResult<()>;
}
