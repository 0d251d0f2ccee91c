//! Collaborator traits defined in `sentra-core` and implemented outside
//! the engine (persistence layer, audit pipeline, message delivery).

pub mod audit;
pub mod notifier;
pub mod store;

pub use audit::AuditSink;
pub use notifier::Notifier;
pub use store::{AccessGraphStore, AccountStore};
