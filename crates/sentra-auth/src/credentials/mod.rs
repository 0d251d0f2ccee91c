//! Identifier + secret verification.

pub mod verifier;

pub use verifier::CredentialVerifier;
