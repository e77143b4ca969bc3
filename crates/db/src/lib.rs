//! PostgreSQL persistence for PromptSmith.
//!
//! - [`models`] -- row structs and DTOs.
//! - [`repositories`] -- zero-sized repos with async query methods.
//! - [`metering_guard`] -- self-test for the `user_limits` write guard.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod metering_guard;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// SQLSTATE raised by the storage guards (`insufficient_privilege`).
pub const SQLSTATE_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify connectivity.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Whether `err` is a storage guard rejecting a write.
pub fn is_permission_denied(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(SQLSTATE_INSUFFICIENT_PRIVILEGE)
        }
        _ => false,
    }
}
