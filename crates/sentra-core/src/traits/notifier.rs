//! Outbound notification collaborator trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Fire-and-forget delivery of account messages.
///
/// Delivery failures are logged by the engine and never propagated to the
/// caller, so an outage in the mail pipeline cannot block authentication
/// flows.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Sends a password-reset message carrying the cleartext reset token.
    async fn send_password_reset(&self, email: &str, reset_token: &str) -> AppResult<()>;

    /// Sends a welcome message to a newly registered account.
    async fn send_welcome(&self, email: &str, display_name: &str) -> AppResult<()>;
}
