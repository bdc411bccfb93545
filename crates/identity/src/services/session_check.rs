//! Resolving a session token back to its username.

use tracing::debug;

use super::IdentityService;
use crate::types::{IdentityError, IdentityResult};

impl IdentityService {
    /// Return the username a session token was issued for.
    ///
    /// Read-only: the session is neither refreshed nor extended.
    pub async fn authenticate(&self, token: &str) -> IdentityResult<String> {
        if token.is_empty() {
            return Err(IdentityError::InvalidSession);
        }

        let username = self
            .sessions
            .get(token)
            .await
            .map_err(|source| IdentityError::SessionStore {
                operation: "auth.lookup_session",
                source,
            })?;

        match username {
            Some(username) if !username.is_empty() => Ok(username),
            _ => {
                debug!("session token not recognised");
                Err(IdentityError::InvalidSession)
            }
        }
    }
}
