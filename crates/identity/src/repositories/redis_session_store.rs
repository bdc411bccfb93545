//! Redis-backed session store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::info;

use super::session_store::{SessionStore, SessionStoreError};

/// Sessions stored as `SET <prefix><token> <username> EX <ttl>`.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: String,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl_seconds: ttl_seconds.max(1),
        }
    }

    /// Open a managed connection to `url`
    pub async fn connect(
        url: &str,
        key_prefix: impl Into<String>,
        ttl_seconds: u64,
    ) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(backend_error)?;
        let conn = ConnectionManager::new(client).await.map_err(backend_error)?;
        info!("redis session store connected");
        Ok(Self::new(conn, key_prefix, ttl_seconds))
    }

    fn key(&self, token: &str) -> String {
        session_key(&self.key_prefix, token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, token: &str, username: &str) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(self.key(token))
            .arg(username)
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(backend_error)
    }

    async fn get(&self, token: &str) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(self.key(token))
            .query_async(&mut conn)
            .await
            .map_err(backend_error)?;

        value
            .map(|bytes| String::from_utf8(bytes).map_err(|_| SessionStoreError::Encoding))
            .transpose()
    }
}

fn session_key(prefix: &str, token: &str) -> String {
    format!("{prefix}{token}")
}

fn backend_error(err: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Backend(err.to_string())
}
