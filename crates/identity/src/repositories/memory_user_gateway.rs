//! In-memory user gateway for embedding and tests

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use entry_database::{NewUser, User};
use tokio::sync::RwLock;

use super::user_gateway::{GatewayError, GatewayResult, UserRecordGateway};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    next_id: i64,
}

/// User rows held in a map keyed by username.
///
/// Creation checks and inserts under one write lock, so a duplicate username
/// is always rejected with [`GatewayError::DuplicateKey`].
#[derive(Default)]
pub struct MemoryUserGateway {
    inner: RwLock<Inner>,
}

impl MemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl UserRecordGateway for MemoryUserGateway {
    async fn get_by_username(&self, username: &str) -> GatewayResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(username)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create(&self, new_user: NewUser) -> GatewayResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&new_user.username) {
            return Err(GatewayError::DuplicateKey(new_user.username));
        }

        inner.next_id += 1;
        let now = Utc::now().to_rfc3339();
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            nickname: new_user.nickname,
            profile_pic: new_user.profile_pic,
            status: new_user.status,
            created_at: now.clone(),
            updated_at: now,
        };
        inner.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        profile_pic: &str,
    ) -> GatewayResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .values_mut()
            .find(|user| user.id == id)
            .ok_or(GatewayError::NotFound)?;

        user.nickname = nickname.to_string();
        user.profile_pic = profile_pic.to_string();
        user.updated_at = Utc::now().to_rfc3339();
        Ok(())
    }
}
