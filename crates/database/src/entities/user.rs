//! User entity definitions

use serde::{Deserialize, Serialize};

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// One-way hash of the password; never the plaintext.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nickname: String,
    pub profile_pic: String,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn is_enabled(&self) -> bool {
        self.status == UserStatus::Enabled
    }
}

/// Fields needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub profile_pic: String,
    pub status: UserStatus,
}

/// Account status, stored as a small integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Enabled,
    Disabled,
}

impl UserStatus {
    pub const fn code(self) -> i64 {
        match self {
            UserStatus::Enabled => 1,
            UserStatus::Disabled => 2,
        }
    }
}

impl From<i64> for UserStatus {
    // Unknown codes fail closed.
    fn from(code: i64) -> Self {
        match code {
            1 => UserStatus::Enabled,
            _ => UserStatus::Disabled,
        }
    }
}
