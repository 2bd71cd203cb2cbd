//! Database access layer for smon-api
//!
//! SQLite via sqlx. The schema is initialized idempotently at startup;
//! there is no separate migration step.

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

pub mod activities;

/// Connect to the database, creating it on first run, and ensure the schema
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    // mode=rwc: create the database file when missing
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePool::connect(&db_url)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    init_schema(&pool)
        .await
        .context("Failed to initialize database schema")?;

    Ok(pool)
}

/// Create the activities table and its timestamp index if missing
///
/// Safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            actor_name TEXT,
            actor_image TEXT,
            timestamp TEXT,
            datatype TEXT,
            content TEXT,
            languages TEXT,
            place TEXT,
            followers INTEGER,
            sentiment TEXT,
            streams TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS ix_activities_timestamp ON activities (timestamp)",
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
