//! # sentra-auth
//!
//! The Sentra authentication and authorization engine: credential
//! verification, signed-token issuance, permission aggregation from the
//! role graph, and the per-request access-decision gate.
//!
//! ## Modules
//!
//! - `jwt` — access-token claims, HS256 issuance, and verification
//! - `password` — Argon2id secret hashing and verification
//! - `credentials` — identifier + secret verification against the store
//! - `permissions` — flattened permission-set resolution from roles
//! - `gate` — the Allow/Deny decision function over token claims

pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod permissions;

pub use credentials::CredentialVerifier;
pub use gate::{AccessGate, Decision, DenyReason};
pub use jwt::{Claims, TokenIssuer, TokenVerifier};
pub use password::SecretHasher;
pub use permissions::{PermissionResolver, RoleMembership};
