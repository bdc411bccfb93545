//! Boundary DTOs and error types for the identity core.

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{IdentityError, IdentityResult};
pub use requests::{EditRequest, LoginRequest, RegisterRequest};
pub use responses::{EditResponse, LoginResponse, RegisterResponse};
