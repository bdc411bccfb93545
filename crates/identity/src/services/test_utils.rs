//! Fakes shared by the workflow tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use entry_config::PasswordScheme;
use entry_database::{NewUser, User, UserStatus};

use crate::repositories::{
    GatewayError, GatewayResult, MemorySessionStore, MemoryUserGateway, SessionStore,
    SessionStoreError, UserRecordGateway,
};
use crate::services::IdentityService;
use crate::utils::password::CredentialValidator;

/// Memory gateway with switchable failures and call counters
#[derive(Default)]
pub struct FlakyUserGateway {
    inner: MemoryUserGateway,
    pub fail_lookup: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl FlakyUserGateway {
    pub async fn user_count(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl UserRecordGateway for FlakyUserGateway {
    async fn get_by_username(&self, username: &str) -> GatewayResult<User> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("connection reset".to_string()));
        }
        self.inner.get_by_username(username).await
    }

    async fn create(&self, new_user: NewUser) -> GatewayResult<User> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("disk full".to_string()));
        }
        self.inner.create(new_user).await
    }

    async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        profile_pic: &str,
    ) -> GatewayResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("read-only replica".to_string()));
        }
        self.inner.update_profile(id, nickname, profile_pic).await
    }
}

/// Memory session store with switchable failures
pub struct FlakySessionStore {
    inner: MemorySessionStore,
    pub fail_set: AtomicBool,
    pub fail_get: AtomicBool,
    pub set_calls: AtomicUsize,
}

impl Default for FlakySessionStore {
    fn default() -> Self {
        Self {
            inner: MemorySessionStore::new(Duration::from_secs(3_600)),
            fail_set: AtomicBool::new(false),
            fail_get: AtomicBool::new(false),
            set_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionStore for FlakySessionStore {
    async fn set(&self, token: &str, username: &str) -> Result<(), SessionStoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(SessionStoreError::Backend("cache unavailable".to_string()));
        }
        self.inner.set(token, username).await
    }

    async fn get(&self, token: &str) -> Result<Option<String>, SessionStoreError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(SessionStoreError::Backend("cache unavailable".to_string()));
        }
        self.inner.get(token).await
    }
}

pub struct Harness {
    pub users: Arc<FlakyUserGateway>,
    pub sessions: Arc<FlakySessionStore>,
    pub service: IdentityService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_credentials(CredentialValidator::new(PasswordScheme::Sha256))
    }

    pub fn with_credentials(credentials: CredentialValidator) -> Self {
        let users = Arc::new(FlakyUserGateway::default());
        let sessions = Arc::new(FlakySessionStore::default());
        let service = IdentityService::new(users.clone(), sessions.clone(), credentials);
        Self {
            users,
            sessions,
            service,
        }
    }

    /// Insert a user directly, bypassing registration
    pub async fn seed_user(&self, username: &str, password: &str, status: UserStatus) -> User {
        let password_hash = self.service.credentials().hash(password).unwrap();
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                nickname: format!("{username}-nick"),
                profile_pic: format!("{username}.png"),
                status,
            })
            .await
            .unwrap();
        self.users.create_calls.store(0, Ordering::SeqCst);
        user
    }

    pub async fn stored(&self, username: &str) -> User {
        self.users.get_by_username(username).await.unwrap()
    }
}
