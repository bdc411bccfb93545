//! The identity service and its injected collaborators.

use std::sync::Arc;

use crate::repositories::{SessionStore, UserRecordGateway};
use crate::utils::password::CredentialValidator;

/// Entry point for login, registration, profile edits and session checks.
///
/// Holds no mutable state of its own; everything lives in the two
/// collaborators, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct IdentityService {
    pub(crate) users: Arc<dyn UserRecordGateway>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    pub(crate) credentials: CredentialValidator,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRecordGateway>,
        sessions: Arc<dyn SessionStore>,
        credentials: CredentialValidator,
    ) -> Self {
        Self {
            users,
            sessions,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialValidator {
        &self.credentials
    }
}
