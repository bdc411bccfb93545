//! Internal utilities for the identity core.

pub mod password;
pub mod token;
pub mod validation;
