//! User repository for database operations.

use crate::entities::{NewUser, User, UserStatus};
use crate::types::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const USER_COLUMNS: &str =
    "id, username, password, nickname, profile_pic, status, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| map_user(&row)).transpose()
    }

    /// Insert a new user row.
    ///
    /// A username that already exists surfaces as [`DatabaseError::Duplicate`]
    /// from the `UNIQUE` constraint.
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (username, password, nickname, profile_pic, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.nickname)
        .bind(&new_user.profile_pic)
        .bind(new_user.status.code())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(user_id = id, username = %new_user.username, "inserted user row");

        Ok(User {
            id,
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            nickname: new_user.nickname.clone(),
            profile_pic: new_user.profile_pic.clone(),
            status: new_user.status,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update nickname and profile picture; every other column is left alone
    pub async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        profile_pic: &str,
    ) -> DatabaseResult<()> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET nickname = ?, profile_pic = ?, updated_at = ? WHERE id = ?",
        )
        .bind(nickname)
        .bind(profile_pic)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {id}")));
        }

        Ok(())
    }
}

fn map_user(row: &SqliteRow) -> DatabaseResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password")?,
        nickname: row.try_get("nickname")?,
        profile_pic: row.try_get("profile_pic")?,
        status: UserStatus::from(row.try_get::<i64, _>("status")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
