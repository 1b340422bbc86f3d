use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::models::extra_field::EXTRA_FIELD_COUNT;
use crate::models::setting;

pub type DbPool = SqlitePool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

/// Open (creating if needed) the SQLite file at `path`.
pub async fn init_pool(path: &Path, max_size: u32) -> Result<DbPool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_size)
        .connect_with(opts)
        .await
}

/// Bring the schema up to date and make sure the settings row exists.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::raw_sql(MIGRATIONS).execute(&mut *conn).await?;
    let added = add_missing_document_columns(&mut conn).await?;
    if !added.is_empty() {
        log::info!("Added document columns: {}", added.join(", "));
    }
    setting::ensure_row(&mut conn).await?;

    log::info!("Database migrations complete");
    Ok(())
}

/// Databases created before the extra fields existed lack the
/// `field{n}_value` columns. Add whichever are missing; nothing is dropped.
pub async fn add_missing_document_columns(
    conn: &mut sqlx::SqliteConnection,
) -> Result<Vec<String>, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'documents')",
    )
    .fetch_one(&mut *conn)
    .await?;
    if !table_exists {
        return Ok(Vec::new());
    }

    let existing: HashSet<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('documents')")
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .collect();

    let mut added = Vec::new();
    for idx in 1..=EXTRA_FIELD_COUNT {
        let column = format!("field{idx}_value");
        if existing.contains(&column) {
            continue;
        }
        sqlx::query(&format!("ALTER TABLE documents ADD COLUMN {column} VARCHAR(255)"))
            .execute(&mut *conn)
            .await?;
        added.push(column);
    }
    Ok(added)
}
