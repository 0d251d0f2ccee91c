//! Audit record entity.

pub mod model;

pub use model::{AuditAction, AuditRecord};
