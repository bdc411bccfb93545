//! In-process session cache with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::session_store::{SessionStore, SessionStoreError};

/// Minimum spacing between sweeps of expired entries on write.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Expiry used when `now + ttl` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 86_400);

struct Entry {
    username: String,
    expires_at: Instant,
}

struct Inner {
    entries: HashMap<String, Entry>,
    next_sweep: Instant,
}

/// Sessions kept in process memory.
///
/// Entries past their TTL read as a miss and are dropped on that read.
/// Writes also sweep the whole map at most once per [`SWEEP_INTERVAL`], so
/// tokens that are never read again do not accumulate.
pub struct MemorySessionStore {
    ttl: Duration,
    inner: RwLock<Inner>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                next_sweep: Instant::now() + SWEEP_INTERVAL,
            }),
        }
    }

    fn expiry_from(&self, now: Instant) -> Instant {
        now.checked_add(self.ttl)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, token: &str, username: &str) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let entry = Entry {
            username: username.to_string(),
            expires_at: self.expiry_from(now),
        };

        let mut inner = self.inner.write().await;
        if now >= inner.next_sweep {
            let before = inner.entries.len();
            inner.entries.retain(|_, entry| entry.expires_at > now);
            inner.next_sweep = now + SWEEP_INTERVAL;
            let removed = before - inner.entries.len();
            if removed > 0 {
                debug!(removed, "swept expired sessions");
            }
        }
        inner.entries.insert(token.to_string(), entry);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<String>, SessionStoreError> {
        let now = Instant::now();
        {
            let inner = self.inner.read().await;
            match inner.entries.get(token) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => {
                    return Ok(Some(entry.username.clone()));
                }
                Some(_) => {}
            }
        }

        let mut inner = self.inner.write().await;
        if inner
            .entries
            .get(token)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            inner.entries.remove(token);
            debug!("evicted expired session");
        }
        Ok(None)
    }
}
