//! The authentication operation surface.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use sentra_auth::credentials::CredentialVerifier;
use sentra_auth::gate::{AccessGate, Decision};
use sentra_auth::jwt::{Claims, TokenIssuer, TokenVerifier};
use sentra_auth::password::SecretHasher;
use sentra_auth::permissions::{PermissionResolver, RoleMembership};
use sentra_core::config::auth::AuthConfig;
use sentra_core::error::AppError;
use sentra_core::traits::{AccessGraphStore, AccountStore, AuditSink, Notifier};
use sentra_entity::account::{Account, CreateAccount};
use sentra_entity::audit::{AuditAction, AuditRecord};

use super::reset;

/// Minimum accepted secret length for registration and changes.
const MIN_SECRET_LENGTH: usize = 8;

/// Request origin metadata carried into the audit trail.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RequestOrigin {
    /// Network address the request came from.
    pub source_address: Option<String>,
    /// Client agent string.
    pub agent: Option<String>,
}

/// The authenticated identity returned alongside a token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    /// Account identifier.
    pub id: Uuid,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role names at issuance time.
    pub roles: Vec<String>,
    /// Permission codes at issuance time.
    pub permissions: Vec<String>,
}

/// A signed access token, its paired refresh token, and the principal they
/// were issued to.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionTokens {
    /// Signed, self-contained access token.
    pub access_token: String,
    /// Opaque refresh token, stored server-side against the account.
    pub refresh_token: String,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated identity.
    pub principal: Principal,
}

/// Data required to register a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Email address (also the login identifier).
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext secret; hashed before it reaches the store.
    pub secret: String,
}

/// Orchestrates the engine components behind the caller-facing operations.
///
/// Configuration is taken once at construction and treated as immutable;
/// every operation is stateless beyond the injected collaborators.
#[derive(Clone)]
pub struct AuthService {
    /// Account reads/writes.
    accounts: Arc<dyn AccountStore>,
    /// Identifier + secret verification.
    credentials: CredentialVerifier,
    /// Role/permission resolution.
    resolver: PermissionResolver,
    /// Token signing.
    issuer: TokenIssuer,
    /// Token validation.
    verifier: TokenVerifier,
    /// Access decisions.
    gate: AccessGate,
    /// Secret hashing.
    hasher: SecretHasher,
    /// Audit trail (best-effort).
    audit: Arc<dyn AuditSink>,
    /// Outbound messages (best-effort).
    notifier: Arc<dyn Notifier>,
    /// Reset token lifetime in minutes.
    reset_ttl_minutes: i64,
    /// Role assigned on registration.
    registration_role: String,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Wires the engine together from configuration and collaborators.
    pub fn new(
        config: &AuthConfig,
        accounts: Arc<dyn AccountStore>,
        graph: Arc<dyn AccessGraphStore>,
        audit: Arc<dyn AuditSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let hasher = SecretHasher::new();
        Self {
            credentials: CredentialVerifier::new(accounts.clone(), hasher.clone()),
            resolver: PermissionResolver::new(graph),
            issuer: TokenIssuer::new(config),
            verifier: TokenVerifier::new(config),
            gate: AccessGate::new(config),
            hasher,
            accounts,
            audit,
            notifier,
            reset_ttl_minutes: config.reset_token_ttl_minutes as i64,
            registration_role: config.default_registration_role.clone(),
        }
    }

    /// Authenticates an identifier + secret pair and issues a token pair.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
        origin: &RequestOrigin,
    ) -> Result<SessionTokens, AppError> {
        let account = self.credentials.verify(identifier, secret).await?;

        self.accounts.record_login(account.id, Utc::now()).await?;

        let membership = self.resolver.membership(account.id).await?;
        let tokens = self.issue_pair(&account, &membership).await?;

        self.record_audit(
            AuditRecord::for_account(account.id, AuditAction::Login)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        info!(account_id = %account.id, "Login succeeded");

        Ok(tokens)
    }

    /// Rotates an expired access token + refresh token pair.
    ///
    /// The access token is parsed with its expiry deliberately ignored;
    /// signature, issuer, and audience checks still apply. Permissions are
    /// re-resolved fresh, never reused from the old token.
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
        origin: &RequestOrigin,
    ) -> Result<SessionTokens, AppError> {
        let claims = self.verifier.parse_allowing_expired(access_token)?;

        let account = self
            .accounts
            .find_by_id(claims.account_id())
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        if !account.is_active {
            return Err(AppError::account_disabled());
        }

        if account.refresh_token.as_deref() != Some(refresh_token) {
            debug!(account_id = %account.id, "Refresh rejected: token mismatch");
            return Err(AppError::refresh_token_mismatch());
        }

        match account.refresh_token_expires_at {
            Some(expires_at) if expires_at > Utc::now() => {}
            _ => {
                debug!(account_id = %account.id, "Refresh rejected: token expired");
                return Err(AppError::refresh_token_expired());
            }
        }

        let membership = self.resolver.membership(account.id).await?;

        let issued = self.issuer.issue_access_token(
            &account,
            membership.role_names(),
            membership.permission_codes(),
        )?;
        let new_refresh = self.issuer.issue_refresh_token()?;
        let refresh_expires = self.issuer.refresh_expiry();

        // Conditional swap: a concurrent rotation that committed first
        // makes this one observe a conflict instead of double-issuing.
        let rotated = self
            .accounts
            .rotate_refresh_token(account.id, refresh_token, &new_refresh, refresh_expires)
            .await?;
        if !rotated {
            debug!(account_id = %account.id, "Refresh rejected: lost rotation race");
            return Err(AppError::refresh_token_mismatch());
        }

        self.record_audit(
            AuditRecord::for_account(account.id, AuditAction::Refresh)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        info!(account_id = %account.id, "Token pair rotated");

        Ok(SessionTokens {
            access_token: issued.token,
            refresh_token: new_refresh,
            expires_at: issued.expires_at,
            principal: principal_of(&account, &membership),
        })
    }

    /// Clears the stored refresh token, ending the refresh lineage.
    ///
    /// Already-issued access tokens stay valid until they expire.
    pub async fn logout(&self, account_id: Uuid, origin: &RequestOrigin) -> Result<(), AppError> {
        self.accounts.clear_refresh_token(account_id).await?;

        self.record_audit(
            AuditRecord::for_account(account_id, AuditAction::Logout)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        info!(account_id = %account_id, "Logged out");

        Ok(())
    }

    /// Registers a new account with the configured default role.
    pub async fn register(
        &self,
        request: RegisterRequest,
        origin: &RequestOrigin,
    ) -> Result<Principal, AppError> {
        if self.accounts.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        validate_secret(&request.secret)?;

        let secret_hash = self.hasher.hash_secret(&request.secret)?;
        let account = self
            .accounts
            .create(&CreateAccount {
                email: request.email,
                first_name: request.first_name,
                last_name: request.last_name,
                secret_hash,
                initial_role: self.registration_role.clone(),
            })
            .await?;

        let membership = self.resolver.membership(account.id).await?;

        self.record_audit(
            AuditRecord::for_account(account.id, AuditAction::Register)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        if let Err(e) = self
            .notifier
            .send_welcome(&account.email, &account.full_name())
            .await
        {
            warn!(account_id = %account.id, error = %e, "Welcome message not delivered");
        }

        info!(account_id = %account.id, "Account registered");

        Ok(principal_of(&account, &membership))
    }

    /// Changes an account's secret, verifying the current one first.
    pub async fn change_secret(
        &self,
        account_id: Uuid,
        current_secret: &str,
        new_secret: &str,
        origin: &RequestOrigin,
    ) -> Result<(), AppError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        if !self
            .hasher
            .verify_secret(current_secret, &account.secret_hash)?
        {
            return Err(AppError::invalid_credentials());
        }

        validate_secret(new_secret)?;

        let new_hash = self.hasher.hash_secret(new_secret)?;
        self.accounts
            .update_secret_hash(account_id, &new_hash)
            .await?;

        self.record_audit(
            AuditRecord::for_account(account_id, AuditAction::PasswordChange)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        info!(account_id = %account_id, "Secret changed");

        Ok(())
    }

    /// Starts a password reset.
    ///
    /// Always reports success, whether or not the email maps to an active
    /// account, so the operation cannot be used for enumeration.
    pub async fn request_reset(
        &self,
        email: &str,
        origin: &RequestOrigin,
    ) -> Result<(), AppError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            debug!("Reset requested for unknown email");
            return Ok(());
        };
        if !account.is_active {
            debug!(account_id = %account.id, "Reset requested for disabled account");
            return Ok(());
        }

        let (token, digest) = reset::generate()?;
        let expires_at = Utc::now() + chrono::Duration::minutes(self.reset_ttl_minutes);
        self.accounts
            .set_reset_token(account.id, &digest, expires_at)
            .await?;

        if let Err(e) = self.notifier.send_password_reset(&account.email, &token).await {
            warn!(account_id = %account.id, error = %e, "Reset message not delivered");
        }

        self.record_audit(
            AuditRecord::for_account(account.id, AuditAction::ResetRequest)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        Ok(())
    }

    /// Completes a password reset with the token from [`request_reset`].
    ///
    /// Every failure path returns the same generic rejection. A completed
    /// reset also clears the stored refresh token, so stolen long-lived
    /// credentials die with the old secret.
    pub async fn complete_reset(
        &self,
        email: &str,
        reset_token: &str,
        new_secret: &str,
        origin: &RequestOrigin,
    ) -> Result<(), AppError> {
        let invalid = || AppError::validation("Invalid reset request");

        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(invalid)?;

        let stored_digest = account.reset_token_digest.as_deref().ok_or_else(invalid)?;
        if stored_digest != reset::digest(reset_token) {
            return Err(invalid());
        }
        match account.reset_token_expires_at {
            Some(expires_at) if expires_at > Utc::now() => {}
            _ => return Err(invalid()),
        }

        validate_secret(new_secret)?;

        let new_hash = self.hasher.hash_secret(new_secret)?;
        self.accounts
            .update_secret_hash(account.id, &new_hash)
            .await?;
        self.accounts.clear_reset_token(account.id).await?;
        self.accounts.clear_refresh_token(account.id).await?;

        self.record_audit(
            AuditRecord::for_account(account.id, AuditAction::ResetComplete)
                .with_origin(origin.source_address.clone(), origin.agent.clone()),
        )
        .await;

        info!(account_id = %account.id, "Secret reset completed");

        Ok(())
    }

    /// Validates a bearer token and returns its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verifier.verify(token)
    }

    /// Evaluates the access gate for the given claims and permission code.
    pub fn authorize(&self, claims: Option<&Claims>, required_permission: &str) -> Decision {
        self.gate.authorize(claims, required_permission)
    }

    /// Issues a token pair and persists the refresh side.
    ///
    /// The pair counts as committed only once the store acknowledges the
    /// refresh-token write.
    async fn issue_pair(
        &self,
        account: &Account,
        membership: &RoleMembership,
    ) -> Result<SessionTokens, AppError> {
        let issued = self.issuer.issue_access_token(
            account,
            membership.role_names(),
            membership.permission_codes(),
        )?;
        let refresh_token = self.issuer.issue_refresh_token()?;
        let refresh_expires = self.issuer.refresh_expiry();

        self.accounts
            .set_refresh_token(account.id, &refresh_token, refresh_expires)
            .await?;

        Ok(SessionTokens {
            access_token: issued.token,
            refresh_token,
            expires_at: issued.expires_at,
            principal: principal_of(account, membership),
        })
    }

    /// Appends to the audit trail, best-effort.
    ///
    /// A sink failure is logged and never rolls back the operation the
    /// record describes.
    async fn record_audit(&self, record: AuditRecord) {
        if let Err(e) = self.audit.record(record).await {
            warn!(error = %e, "Audit record not persisted");
        }
    }
}

/// Builds the caller-facing principal from an account and its membership
/// snapshot.
fn principal_of(account: &Account, membership: &RoleMembership) -> Principal {
    Principal {
        id: account.id,
        email: account.email.clone(),
        name: account.full_name(),
        roles: membership.role_names(),
        permissions: membership.permission_codes(),
    }
}

/// Minimal secret policy shared by registration, change, and reset.
fn validate_secret(secret: &str) -> Result<(), AppError> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(AppError::validation(format!(
            "Secret must be at least {MIN_SECRET_LENGTH} characters"
        )));
    }
    Ok(())
}
