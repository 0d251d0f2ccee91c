//! Shared test harness: in-memory collaborator implementations wired into
//! a fully constructed [`AuthService`].
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use sentra_auth::password::SecretHasher;
use sentra_core::config::auth::AuthConfig;
use sentra_core::error::AppError;
use sentra_core::result::AppResult;
use sentra_core::traits::{AccessGraphStore, AccountStore, AuditSink, Notifier};
use sentra_entity::account::{Account, CreateAccount};
use sentra_entity::audit::AuditRecord;
use sentra_entity::permission::Permission;
use sentra_entity::role::Role;
use sentra_service::{AuthService, RequestOrigin};

/// In-memory account rows keyed by id.
#[derive(Default)]
pub struct InMemoryAccounts {
    rows: Mutex<HashMap<Uuid, Account>>,
}

impl InMemoryAccounts {
    pub fn insert(&self, account: Account) {
        self.rows.lock().unwrap().insert(account.id, account);
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    /// Mutates a stored row in place (for disabling accounts, forcing
    /// expiries, and similar test setups).
    pub fn mutate(&self, id: Uuid, f: impl FnOnce(&mut Account)) {
        if let Some(account) = self.rows.lock().unwrap().get_mut(&id) {
            f(account);
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccounts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, account: &CreateAccount) -> AppResult<Account> {
        let row = Account {
            id: Uuid::new_v4(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            secret_hash: account.secret_hash.clone(),
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            reset_token_digest: None,
            reset_token_expires_at: None,
        };
        self.insert(row.clone());
        Ok(row)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.mutate(id, |a| a.last_login_at = Some(at));
        Ok(())
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.mutate(id, |a| {
            a.refresh_token = Some(token.to_string());
            a.refresh_token_expires_at = Some(expires_at);
        });
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        expected_current: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let Some(account) = rows.get_mut(&id) else {
            return Ok(false);
        };
        if account.refresh_token.as_deref() != Some(expected_current) {
            return Ok(false);
        }
        account.refresh_token = Some(new_token.to_string());
        account.refresh_token_expires_at = Some(expires_at);
        Ok(true)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()> {
        self.mutate(id, |a| {
            a.refresh_token = None;
            a.refresh_token_expires_at = None;
        });
        Ok(())
    }

    async fn update_secret_hash(&self, id: Uuid, secret_hash: &str) -> AppResult<()> {
        self.mutate(id, |a| a.secret_hash = secret_hash.to_string());
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.mutate(id, |a| {
            a.reset_token_digest = Some(digest.to_string());
            a.reset_token_expires_at = Some(expires_at);
        });
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        self.mutate(id, |a| {
            a.reset_token_digest = None;
            a.reset_token_expires_at = None;
        });
        Ok(())
    }
}

/// Delegating wrapper that can interleave a rival refresh-token rotation
/// between the service's read of an account and its conditional write.
pub struct ContendedAccounts {
    inner: Arc<InMemoryAccounts>,
    contend_next: Mutex<bool>,
}

/// The refresh token a rival rotation leaves behind.
pub const RIVAL_REFRESH_TOKEN: &str = "rival-rotation-token";

impl ContendedAccounts {
    pub fn new(inner: Arc<InMemoryAccounts>) -> Self {
        Self {
            inner,
            contend_next: Mutex::new(false),
        }
    }

    /// Makes the next `rotate_refresh_token` call observe a rival rotation
    /// that committed first.
    pub fn contend_next_rotation(&self) {
        *self.contend_next.lock().unwrap() = true;
    }
}

#[async_trait]
impl AccountStore for ContendedAccounts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.inner.find_by_email(email).await
    }

    async fn create(&self, account: &CreateAccount) -> AppResult<Account> {
        self.inner.create(account).await
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.inner.record_login(id, at).await
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.inner.set_refresh_token(id, token, expires_at).await
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        expected_current: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let contend = std::mem::take(&mut *self.contend_next.lock().unwrap());
        if contend {
            self.inner
                .set_refresh_token(id, RIVAL_REFRESH_TOKEN, expires_at)
                .await?;
        }
        self.inner
            .rotate_refresh_token(id, expected_current, new_token, expires_at)
            .await
    }

    async fn clear_refresh_token(&self, id: Uuid) -> AppResult<()> {
        self.inner.clear_refresh_token(id).await
    }

    async fn update_secret_hash(&self, id: Uuid, secret_hash: &str) -> AppResult<()> {
        self.inner.update_secret_hash(id, secret_hash).await
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.inner.set_reset_token(id, digest, expires_at).await
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        self.inner.clear_reset_token(id).await
    }
}

/// Account store whose every call fails, for fail-closed assertions.
#[derive(Default)]
pub struct OfflineAccounts;

fn offline() -> AppError {
    AppError::store("Account store offline")
}

#[async_trait]
impl AccountStore for OfflineAccounts {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Account>> {
        Err(offline())
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
        Err(offline())
    }

    async fn create(&self, _account: &CreateAccount) -> AppResult<Account> {
        Err(offline())
    }

    async fn record_login(&self, _id: Uuid, _at: DateTime<Utc>) -> AppResult<()> {
        Err(offline())
    }

    async fn set_refresh_token(
        &self,
        _id: Uuid,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        Err(offline())
    }

    async fn rotate_refresh_token(
        &self,
        _id: Uuid,
        _expected_current: &str,
        _new_token: &str,
        _expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        Err(offline())
    }

    async fn clear_refresh_token(&self, _id: Uuid) -> AppResult<()> {
        Err(offline())
    }

    async fn update_secret_hash(&self, _id: Uuid, _secret_hash: &str) -> AppResult<()> {
        Err(offline())
    }

    async fn set_reset_token(
        &self,
        _id: Uuid,
        _digest: &str,
        _expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        Err(offline())
    }

    async fn clear_reset_token(&self, _id: Uuid) -> AppResult<()> {
        Err(offline())
    }
}

/// In-memory role/permission graph.
#[derive(Default)]
pub struct InMemoryGraph {
    assignments: Mutex<HashMap<Uuid, Vec<Role>>>,
    grants: Mutex<HashMap<Uuid, Vec<Permission>>>,
}

impl InMemoryGraph {
    /// Assigns a role to an account and grants it the given permission
    /// codes.
    pub fn assign(&self, account_id: Uuid, role_name: &str, permission_codes: &[&str]) {
        let role = Role {
            id: Uuid::new_v4(),
            name: role_name.to_string(),
            description: String::new(),
            is_system: false,
            created_at: Utc::now(),
        };
        let permissions: Vec<Permission> = permission_codes
            .iter()
            .map(|code| Permission {
                id: Uuid::new_v4(),
                name: code.to_string(),
                code: code.to_string(),
                group: "test".to_string(),
                description: String::new(),
                created_at: Utc::now(),
            })
            .collect();
        self.grants.lock().unwrap().insert(role.id, permissions);
        self.assignments
            .lock()
            .unwrap()
            .entry(account_id)
            .or_default()
            .push(role);
    }
}

#[async_trait]
impl AccessGraphStore for InMemoryGraph {
    async fn roles_for_account(&self, account_id: Uuid) -> AppResult<Vec<Role>> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn permissions_for_roles(&self, role_ids: &[Uuid]) -> AppResult<Vec<Permission>> {
        let grants = self.grants.lock().unwrap();
        let mut out = Vec::new();
        for id in role_ids {
            out.extend(grants.get(id).cloned().unwrap_or_default());
        }
        Ok(out)
    }
}

/// Records audit entries for assertions.
#[derive(Default)]
pub struct RecordingAudit {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAudit {
    pub fn actions(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.action.to_string())
            .collect()
    }
}

#[async_trait]
impl AuditSink for RecordingAudit {
    async fn record(&self, record: AuditRecord) -> AppResult<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Captures outbound messages, including cleartext reset tokens.
#[derive(Default)]
pub struct RecordingNotifier {
    reset_tokens: Mutex<Vec<(String, String)>>,
    welcomes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn last_reset_token(&self) -> Option<String> {
        self.reset_tokens
            .lock()
            .unwrap()
            .last()
            .map(|(_, token)| token.clone())
    }

    pub fn reset_count(&self) -> usize {
        self.reset_tokens.lock().unwrap().len()
    }

    pub fn welcome_count(&self) -> usize {
        self.welcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_password_reset(&self, email: &str, reset_token: &str) -> AppResult<()> {
        self.reset_tokens
            .lock()
            .unwrap()
            .push((email.to_string(), reset_token.to_string()));
        Ok(())
    }

    async fn send_welcome(&self, email: &str, _display_name: &str) -> AppResult<()> {
        self.welcomes.lock().unwrap().push(email.to_string());
        Ok(())
    }
}

/// A fully wired service plus handles to every collaborator.
pub struct TestHarness {
    pub config: AuthConfig,
    pub service: AuthService,
    pub accounts: Arc<InMemoryAccounts>,
    pub graph: Arc<InMemoryGraph>,
    pub audit: Arc<RecordingAudit>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        init_tracing();
        let accounts = Arc::new(InMemoryAccounts::default());
        let graph = Arc::new(InMemoryGraph::default());
        let audit = Arc::new(RecordingAudit::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = AuthService::new(
            &config,
            accounts.clone(),
            graph.clone(),
            audit.clone(),
            notifier.clone(),
        );
        Self {
            config,
            service,
            accounts,
            graph,
            audit,
            notifier,
        }
    }

    /// Seeds an active account with a hashed secret and the given
    /// role-to-permissions assignments.
    pub fn seed_account(&self, email: &str, secret: &str, roles: &[(&str, &[&str])]) -> Uuid {
        seed_account_into(&self.accounts, &self.graph, email, secret, roles)
    }
}

/// Seeds an active account with a hashed secret into the given store and
/// wires its role assignments.
pub fn seed_account_into(
    accounts: &InMemoryAccounts,
    graph: &InMemoryGraph,
    email: &str,
    secret: &str,
    roles: &[(&str, &[&str])],
) -> Uuid {
    let hasher = SecretHasher::new();
    let account = Account {
        id: Uuid::new_v4(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "Account".to_string(),
        secret_hash: hasher.hash_secret(secret).unwrap(),
        is_active: true,
        created_at: Utc::now(),
        last_login_at: None,
        refresh_token: None,
        refresh_token_expires_at: None,
        reset_token_digest: None,
        reset_token_expires_at: None,
    };
    let id = account.id;
    accounts.insert(account);
    for (role, permissions) in roles {
        graph.assign(id, role, permissions);
    }
    id
}

/// Installs a test-writer subscriber once per process.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        signing_key: "0123456789abcdef0123456789abcdef".to_string(),
        issuer: "sentra".to_string(),
        audience: "sentra-clients".to_string(),
        access_token_ttl_minutes: 15,
        refresh_token_ttl_days: 7,
        reset_token_ttl_minutes: 60,
        admin_role: "Admin".to_string(),
        admin_bypass_enabled: true,
        default_registration_role: "User".to_string(),
    }
}

pub fn origin() -> RequestOrigin {
    RequestOrigin {
        source_address: Some("203.0.113.7".to_string()),
        agent: Some("sentra-tests".to_string()),
    }
}
