//! Identity workflows.
//!
//! Every workflow is a method on [`IdentityService`]; each one lives in its
//! own module next to its tests.

pub mod identity_service;
mod login;
mod profile;
mod registration;
mod session_check;

#[cfg(test)]
pub(crate) mod test_utils;

pub use identity_service::IdentityService;
