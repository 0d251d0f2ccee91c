//! Argon2id secret hashing.

pub mod hasher;

pub use hasher::SecretHasher;
