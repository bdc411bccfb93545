//! Password login and session issuance.

use tracing::{debug, info, warn};

use super::IdentityService;
use crate::repositories::GatewayError;
use crate::types::{IdentityError, IdentityResult, LoginRequest, LoginResponse};
use crate::utils::token::generate_session_token;

impl IdentityService {
    /// Check credentials and issue a fresh session token bound to the username.
    ///
    /// Unknown usernames, wrong passwords and unreadable stored hashes all fail
    /// with [`IdentityError::InvalidCredentials`], and an unknown username still
    /// pays for one password verification. The status gate runs only after the
    /// password matched.
    pub async fn login(&self, request: &LoginRequest) -> IdentityResult<LoginResponse> {
        let user = match self.users.get_by_username(&request.username).await {
            Ok(user) => user,
            Err(GatewayError::NotFound) => {
                self.credentials.verify_decoy(&request.password);
                debug!(username = %request.username, "login rejected");
                return Err(IdentityError::InvalidCredentials);
            }
            Err(source) => {
                return Err(IdentityError::Persistence {
                    operation: "login.lookup_user",
                    source,
                })
            }
        };

        let matches = match self
            .credentials
            .verify(&request.password, &user.password_hash)
        {
            Ok(matches) => matches,
            Err(err) => {
                warn!(
                    username = %user.username,
                    error = %err,
                    "stored password hash could not be checked"
                );
                false
            }
        };
        if !matches {
            debug!(username = %request.username, "login rejected");
            return Err(IdentityError::InvalidCredentials);
        }

        if !user.is_enabled() {
            debug!(username = %user.username, "login refused for disabled account");
            return Err(IdentityError::AccountDisabled);
        }

        let token = generate_session_token();
        self.sessions
            .set(&token, &user.username)
            .await
            .map_err(|source| IdentityError::SessionStore {
                operation: "login.store_session",
                source,
            })?;

        info!(username = %user.username, "session issued");
        Ok(LoginResponse { session_id: token })
    }
}
