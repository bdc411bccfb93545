//! Entry Database Crate
//!
//! SQLite persistence for user rows: connection management, embedded
//! migrations and the [`UserRepository`].

use sqlx::SqlitePool;
use entry_config::DatabaseConfig;

pub mod connection;
pub mod migrations;
pub mod repos;
pub mod entities;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::UserRepository;

pub use entities::user::{NewUser, User, UserStatus};

pub use types::{errors::DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
