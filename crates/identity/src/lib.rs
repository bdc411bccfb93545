//! # Entry Identity Crate
//!
//! The identity core: password credential checks, opaque session tokens and
//! limited profile edits, all gated on account status.
//!
//! ## Architecture
//!
//! - **Repositories**: the two collaborator contracts, [`UserRecordGateway`]
//!   (user rows) and [`SessionStore`] (token cache), with SQLite, in-memory
//!   and redis adapters
//! - **Services**: [`IdentityService`] and its four workflows
//! - **Types**: boundary DTOs and the error taxonomy
//! - **Utils**: credential hashing, token generation, field validation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entry_identity::{IdentityService, LoginRequest};
//!
//! let service = IdentityService::new(users, sessions, credentials);
//! let response = service.login(&LoginRequest::new("alice", "secret")).await?;
//! let username = service.authenticate(&response.session_id).await?;
//! ```

pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use entry_database::{NewUser, User, UserStatus};

pub use repositories::{
    GatewayError, GatewayResult, MemorySessionStore, MemoryUserGateway, RedisSessionStore,
    SessionStore, SessionStoreError, UserRecordGateway,
};
pub use services::IdentityService;
pub use types::{
    EditRequest, EditResponse, IdentityError, IdentityResult, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse,
};
pub use utils::password::{CredentialError, CredentialValidator};
pub use utils::validation::ValidationError;
