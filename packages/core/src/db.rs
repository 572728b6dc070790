//! Database pool and schema bootstrap.
//!
//! The template declares no domain tables — the only persisted state is an
//! `app_metadata` key/value table recording the schema version. Sessions are
//! scoped per request by the pool; callers acquire, query, and release with
//! no state carried between requests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::AppError;

const SCHEMA_VERSION: i64 = 1;

/// Create a connection pool and bootstrap the schema.
///
/// Accepts any sqlx SQLite URL, including `sqlite::memory:` for tests.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the metadata table and record the current schema version.
///
/// Both statements run on a single acquired connection so that in-memory
/// databases (one store per connection) see a consistent schema.
async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS app_metadata (
             key   TEXT PRIMARY KEY,
             value TEXT NOT NULL
         )",
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "INSERT INTO app_metadata (key, value) VALUES ('schema_version', ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(SCHEMA_VERSION.to_string())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Issue the single trivial query the health check relies on.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|err| AppError::Database(err.to_string()))
}
