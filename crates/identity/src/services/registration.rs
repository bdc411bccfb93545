//! Account registration.

use entry_database::{NewUser, UserStatus};
use tracing::{debug, info};

use super::IdentityService;
use crate::repositories::GatewayError;
use crate::types::{IdentityError, IdentityResult, RegisterRequest, RegisterResponse};

impl IdentityService {
    /// Create an enabled account.
    ///
    /// The existence check and the insert are not atomic. When two
    /// registrations race past the check, the store's unique key on
    /// `username` rejects the loser and that rejection is reported as
    /// [`IdentityError::DuplicateUsername`] as well.
    pub async fn register(&self, request: &RegisterRequest) -> IdentityResult<RegisterResponse> {
        match self.users.get_by_username(&request.username).await {
            Ok(_) => {
                debug!(username = %request.username, "registration rejected, username taken");
                return Err(IdentityError::DuplicateUsername);
            }
            Err(GatewayError::NotFound) => {}
            Err(source) => {
                return Err(IdentityError::Persistence {
                    operation: "register.lookup_user",
                    source,
                })
            }
        }

        let password_hash =
            self.credentials
                .hash(&request.password)
                .map_err(|source| IdentityError::Credential {
                    operation: "register.hash_password",
                    source,
                })?;

        let new_user = NewUser {
            username: request.username.clone(),
            password_hash,
            nickname: request.nickname.clone(),
            profile_pic: request.profile_pic.clone(),
            status: UserStatus::Enabled,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "user registered");
                Ok(RegisterResponse {})
            }
            Err(GatewayError::DuplicateKey(_)) => {
                debug!(username = %request.username, "registration lost race on username");
                Err(IdentityError::DuplicateUsername)
            }
            Err(source) => Err(IdentityError::Persistence {
                operation: "register.create_user",
                source,
            }),
        }
    }
}
