//! # sentra-core
//!
//! Core crate for the Sentra authentication engine. Contains the unified
//! error system, configuration schemas, and the collaborator traits the
//! engine is wired against (persistence, audit trail, notifications).
//!
//! Persistence, audit storage, and message delivery are external
//! collaborators; this crate only defines the seams.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
