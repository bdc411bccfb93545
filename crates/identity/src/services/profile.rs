//! Profile edits for enabled accounts.

use tracing::{debug, info};

use super::IdentityService;
use crate::repositories::GatewayError;
use crate::types::{EditRequest, EditResponse, IdentityError, IdentityResult};

impl IdentityService {
    /// Replace nickname and profile picture.
    ///
    /// Username, password hash and status are never written here.
    pub async fn edit_profile(&self, request: &EditRequest) -> IdentityResult<EditResponse> {
        let user = match self.users.get_by_username(&request.username).await {
            Ok(user) => user,
            Err(GatewayError::NotFound) => {
                return Err(IdentityError::NotFound {
                    operation: "edit.lookup_user",
                })
            }
            Err(source) => {
                return Err(IdentityError::Persistence {
                    operation: "edit.lookup_user",
                    source,
                })
            }
        };

        if !user.is_enabled() {
            debug!(username = %user.username, "profile edit refused for disabled account");
            return Err(IdentityError::AccountDisabled);
        }

        self.users
            .update_profile(user.id, &request.nickname, &request.profile_pic)
            .await
            .map_err(|source| IdentityError::Persistence {
                operation: "edit.update_profile",
                source,
            })?;

        info!(user_id = user.id, username = %user.username, "profile updated");
        Ok(EditResponse {})
    }
}
