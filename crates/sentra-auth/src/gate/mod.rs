//! The per-request access-decision gate.

pub mod access;

pub use access::{AccessGate, Decision, DenyReason};
