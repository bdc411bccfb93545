//! Error types for the identity workflows.

use thiserror::Error;

use crate::repositories::{GatewayError, SessionStoreError};
use crate::utils::password::CredentialError;

/// Typed failures returned by every workflow.
///
/// `operation` names the workflow step that failed, e.g. `register.create_user`.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Unknown username or wrong password. The two cases are never told apart.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("account is disabled")]
    AccountDisabled,

    #[error("username already exists")]
    DuplicateUsername,

    #[error("{operation}: user not found")]
    NotFound { operation: &'static str },

    #[error("{operation}: user store failure: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("{operation}: session store failure: {source}")]
    SessionStore {
        operation: &'static str,
        #[source]
        source: SessionStoreError,
    },

    #[error("invalid session")]
    InvalidSession,

    #[error("{operation}: credential failure: {source}")]
    Credential {
        operation: &'static str,
        #[source]
        source: CredentialError,
    },
}

pub type IdentityResult<T> = Result<T, IdentityError>;
