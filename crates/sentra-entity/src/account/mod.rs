//! Account entity.

pub mod model;

pub use model::{Account, CreateAccount};
