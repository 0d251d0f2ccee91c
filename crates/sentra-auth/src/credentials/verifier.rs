//! Credential verification against stored account rows.

use std::sync::Arc;

use tracing::debug;

use sentra_core::error::AppError;
use sentra_core::traits::AccountStore;
use sentra_entity::account::Account;

use crate::password::SecretHasher;

/// Verifies a submitted identifier + secret pair against the account store.
///
/// Unknown identifier and wrong secret both surface as the same
/// `InvalidCredentials` rejection so callers cannot enumerate accounts;
/// an inactive account is rejected before the secret is even compared.
#[derive(Clone)]
pub struct CredentialVerifier {
    /// Account lookup.
    accounts: Arc<dyn AccountStore>,
    /// Secret hashing.
    hasher: SecretHasher,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish()
    }
}

impl CredentialVerifier {
    /// Creates a new verifier over the given account store.
    pub fn new(accounts: Arc<dyn AccountStore>, hasher: SecretHasher) -> Self {
        Self { accounts, hasher }
    }

    /// Verifies the identifier + secret pair and returns the account.
    ///
    /// The identifier lookup is case-insensitive (delegated to the store).
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<Account, AppError> {
        let Some(account) = self.accounts.find_by_email(identifier).await? else {
            debug!("Login rejected: unknown identifier");
            return Err(AppError::invalid_credentials());
        };

        if !account.is_active {
            debug!(account_id = %account.id, "Login rejected: account disabled");
            return Err(AppError::account_disabled());
        }

        if !self.hasher.verify_secret(secret, &account.secret_hash)? {
            debug!(account_id = %account.id, "Login rejected: secret mismatch");
            return Err(AppError::invalid_credentials());
        }

        Ok(account)
    }
}
