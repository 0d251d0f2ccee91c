//! Persistence collaborator traits.
//!
//! Accounts, roles, and permissions are owned by an external persistence
//! layer; the engine only needs the narrow read/write surface below. Every
//! method is a suspension point with no timeout of its own — timeout policy
//! belongs to the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use sentra_entity::account::{Account, CreateAccount};
use sentra_entity::permission::Permission;
use sentra_entity::role::Role;

use crate::result::AppResult;

/// Read/write access to account rows.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Finds an account by its identifier.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Finds an account by email. Implementations must match
    /// case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Creates a new account row and assigns its initial role.
    async fn create(&self, account: &CreateAccount) -> AppResult<Account>;

    /// Stamps a successful login time.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Unconditionally stores a new refresh token and expiry.
    ///
    /// Used on login, where a fresh authentication always supersedes any
    /// previously stored token.
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Conditionally replaces the stored refresh token.
    ///
    /// The write must succeed only if the currently stored token still
    /// equals `expected_current` (optimistic concurrency). Returns `false`
    /// when the condition fails, which the refresh cycle treats as a
    /// rotation conflict.
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        expected_current: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Clears the stored refresh token and its expiry.
    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()>;

    /// Replaces the account's secret hash.
    async fn update_secret_hash(&self, id: Uuid, secret_hash: &str) -> AppResult<()>;

    /// Stores the digest and expiry of an outstanding reset token.
    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Clears the outstanding reset token.
    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()>;
}

/// Read-only access to the role/permission graph.
///
/// Both methods are explicit batched queries; the engine performs the
/// set-union in memory and never walks a lazily loaded object graph.
#[async_trait]
pub trait AccessGraphStore: Send + Sync + 'static {
    /// Returns all roles assigned to the account. Unknown accounts yield
    /// an empty set.
    async fn roles_for_account(&self, account_id: Uuid) -> AppResult<Vec<Role>>;

    /// Returns all permissions granted to any of the given roles, in one
    /// batch. May contain duplicates when roles overlap.
    async fn permissions_for_roles(&self, role_ids: &[Uuid]) -> AppResult<Vec<Permission>>;
}
