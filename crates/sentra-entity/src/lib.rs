//! # sentra-entity
//!
//! Entity models shared across the Sentra authentication engine.
//!
//! These are plain data types; creation, update, and deletion of accounts,
//! roles, and permissions are owned by the persistence collaborator. The
//! engine only reads the role/permission graph and writes the refresh-token,
//! reset-token, and last-login fields on [`account::Account`].

pub mod account;
pub mod audit;
pub mod permission;
pub mod role;

pub use account::{Account, CreateAccount};
pub use audit::{AuditAction, AuditRecord};
pub use permission::Permission;
pub use role::Role;
