//! Request DTOs accepted by the identity workflows.
//!
//! The workflows assume these fields were already checked with `validate()`
//! by the caller; they never validate on their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::validation::{require, require_length, ValidationError};

const MIN_FIELD_CHARS: usize = 2;
const MAX_FIELD_CHARS: usize = 255;

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length("username", &self.username, MIN_FIELD_CHARS, MAX_FIELD_CHARS)?;
        require_length("password", &self.password, MIN_FIELD_CHARS, MAX_FIELD_CHARS)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_pic: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length("username", &self.username, MIN_FIELD_CHARS, MAX_FIELD_CHARS)?;
        require_length("password", &self.password, MIN_FIELD_CHARS, MAX_FIELD_CHARS)?;
        require_length("nickname", &self.nickname, MIN_FIELD_CHARS, MAX_FIELD_CHARS)
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("nickname", &self.nickname)
            .field("profile_pic", &self.profile_pic)
            .finish()
    }
}

/// Profile edit. Only nickname and profile picture can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profile_pic: String,
}

impl EditRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)
    }
}
