//! Permission entity.

pub mod model;

pub use model::Permission;
