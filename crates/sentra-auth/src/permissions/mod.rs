//! Permission-set resolution from the role graph.

pub mod resolver;

pub use resolver::{PermissionResolver, RoleMembership};
