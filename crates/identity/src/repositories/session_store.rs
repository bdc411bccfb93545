//! Session store contract.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session backend error: {0}")]
    Backend(String),

    #[error("session value is not valid utf-8")]
    Encoding,
}

/// Cache mapping session tokens to the username they were issued for.
///
/// Expiry is the store's business; a token it no longer knows about is
/// reported as `Ok(None)`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set(&self, token: &str, username: &str) -> Result<(), SessionStoreError>;

    async fn get(&self, token: &str) -> Result<Option<String>, SessionStoreError>;
}
