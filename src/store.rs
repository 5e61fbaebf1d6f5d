//! Database bootstrap: create the SQLite file, open the pool, ensure the posts table.

use crate::config::Settings;
use crate::error::AppError;
use crate::sql::{CREATE_CREATED_AT_INDEX, CREATE_POSTS_TABLE};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Ensure the database file in `database_url` exists; create it if not. No-op for in-memory databases.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    if is_memory(database_url) {
        return Ok(());
    }
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!(url = %database_url, "creating database");
        Sqlite::create_database(database_url).await?;
    }
    Ok(())
}

/// Open the pool. An in-memory database lives inside a single connection, so that connection is never recycled.
/// File databases run in WAL mode; writers wait on the busy timeout for the write lock.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);
    let (pool_opts, opts) = if is_memory(&settings.database_url) {
        let pool_opts = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (pool_opts, opts)
    } else {
        let pool_opts = SqlitePoolOptions::new().max_connections(settings.max_connections.max(1));
        (pool_opts, opts.journal_mode(SqliteJournalMode::Wal))
    };
    let pool = pool_opts.connect_with(opts).await?;
    Ok(pool)
}

/// Create the posts table and its index if absent. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CREATE_POSTS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_CREATED_AT_INDEX).execute(pool).await?;
    Ok(())
}

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
