//! # sentra-service
//!
//! The operation surface of the Sentra engine: login, refresh rotation,
//! logout, registration, password change, and the password-reset flow,
//! wired to the audit and notification collaborators.

pub mod auth;

pub use auth::{AuthService, Principal, RegisterRequest, RequestOrigin, SessionTokens};
