//! Flattened permission-set resolution.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use sentra_core::error::AppError;
use sentra_core::traits::AccessGraphStore;
use sentra_entity::role::Role;

/// An account's role assignments and the deduplicated union of permission
/// codes those roles grant, snapshotted at resolution time.
#[derive(Debug, Clone)]
pub struct RoleMembership {
    /// Roles assigned to the account.
    pub roles: Vec<Role>,
    /// Distinct permission codes over all assigned roles.
    pub permissions: BTreeSet<String>,
}

impl RoleMembership {
    /// Returns the role names for embedding in token claims.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    /// Returns the permission codes for embedding in token claims.
    pub fn permission_codes(&self) -> Vec<String> {
        self.permissions.iter().cloned().collect()
    }
}

/// Computes the flattened permission set for an account from its role
/// memberships.
///
/// Resolution is read-only and fresh on every call: two batched queries
/// (roles for the account, permissions for those roles) followed by an
/// in-memory set union. No caching, no lazy graph traversal.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Role/permission graph reads.
    graph: Arc<dyn AccessGraphStore>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish()
    }
}

impl PermissionResolver {
    /// Creates a new resolver over the given graph store.
    pub fn new(graph: Arc<dyn AccessGraphStore>) -> Self {
        Self { graph }
    }

    /// Resolves the distinct permission codes for an account.
    ///
    /// An unknown or role-less account yields the empty set; that is not
    /// an error.
    pub async fn resolve(&self, account_id: Uuid) -> Result<BTreeSet<String>, AppError> {
        Ok(self.membership(account_id).await?.permissions)
    }

    /// Resolves the account's roles together with its permission set.
    pub async fn membership(&self, account_id: Uuid) -> Result<RoleMembership, AppError> {
        let roles = self.graph.roles_for_account(account_id).await?;
        if roles.is_empty() {
            return Ok(RoleMembership {
                roles,
                permissions: BTreeSet::new(),
            });
        }

        let role_ids: Vec<Uuid> = roles.iter().map(|r| r.id).collect();
        let grants = self.graph.permissions_for_roles(&role_ids).await?;

        let permissions: BTreeSet<String> = grants.into_iter().map(|p| p.code).collect();

        Ok(RoleMembership { roles, permissions })
    }
}
