//! Authentication operations.

pub mod reset;
pub mod service;

pub use service::{AuthService, Principal, RegisterRequest, RequestOrigin, SessionTokens};
