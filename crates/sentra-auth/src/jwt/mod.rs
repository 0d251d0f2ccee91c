//! Access-token claims, issuance, and verification.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use issuer::{IssuedAccessToken, TokenIssuer};
pub use verifier::TokenVerifier;
