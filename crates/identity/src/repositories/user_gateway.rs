//! User record gateway contract and its SQLite implementation.

use async_trait::async_trait;
use entry_database::{DatabaseError, NewUser, User, UserRepository};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("user not found")]
    NotFound,

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("user store error: {0}")]
    Other(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Access to stored user rows.
#[async_trait]
pub trait UserRecordGateway: Send + Sync {
    /// Fetch a user by username, [`GatewayError::NotFound`] when absent.
    async fn get_by_username(&self, username: &str) -> GatewayResult<User>;

    /// Insert a user. An existing username yields [`GatewayError::DuplicateKey`].
    async fn create(&self, new_user: NewUser) -> GatewayResult<User>;

    /// Replace nickname and profile picture of the user with `id`.
    async fn update_profile(&self, id: i64, nickname: &str, profile_pic: &str)
        -> GatewayResult<()>;
}

impl From<DatabaseError> for GatewayError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(_) => GatewayError::NotFound,
            DatabaseError::Duplicate(key) => GatewayError::DuplicateKey(key),
            other => GatewayError::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl UserRecordGateway for UserRepository {
    async fn get_by_username(&self, username: &str) -> GatewayResult<User> {
        self.find_by_username(username)
            .await?
            .ok_or(GatewayError::NotFound)
    }

    async fn create(&self, new_user: NewUser) -> GatewayResult<User> {
        Ok(UserRepository::create(self, &new_user).await?)
    }

    async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        profile_pic: &str,
    ) -> GatewayResult<()> {
        Ok(UserRepository::update_profile(self, id, nickname, profile_pic).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_map_onto_gateway_contract() {
        assert!(matches!(
            GatewayError::from(DatabaseError::NotFound("user 1".into())),
            GatewayError::NotFound
        ));
        assert!(matches!(
            GatewayError::from(DatabaseError::Duplicate("users.username".into())),
            GatewayError::DuplicateKey(_)
        ));
        assert!(matches!(
            GatewayError::from(DatabaseError::QueryError("locked".into())),
            GatewayError::Other(_)
        ));
    }
}
