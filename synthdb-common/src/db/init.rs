//! Database initialization
//!
//! Opens (or creates) the catalog database and brings the schema up to
//! date. Schema creation is idempotent, so every service start runs it.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Referential integrity for synth/specification/manufacturer links
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while an acceptance transaction commits
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
///
/// Public so tests can bring up an in-memory database with the real schema.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_manufacturers_table(pool).await?;
    create_synths_table(pool).await?;
    create_specifications_table(pool).await?;
    create_suggestions_table(pool).await?;
    create_api_keys_table(pool).await?;

    tracing::debug!("Database schema initialized");

    Ok(())
}

/// Manufacturer display names, unique case-insensitively.
///
/// The NOCASE unique constraint is the concurrency-safety mechanism for
/// find-or-create during acceptance: two racing inserts of the same name
/// leave exactly one row.
async fn create_manufacturers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manufacturers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            manufacturer TEXT NOT NULL COLLATE NOCASE UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Catalog synths. `manufacturer_id` is nullable: a synth may exist without
/// a resolved manufacturer, though acceptance always resolves one first.
async fn create_synths_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS synths (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            img TEXT,
            manufacturer_id INTEGER REFERENCES manufacturers(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// One specification per synth, created atomically with it.
async fn create_specifications_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS specifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            synth_id INTEGER NOT NULL UNIQUE REFERENCES synths(id),
            year_produced INTEGER NOT NULL,
            polyphony TEXT,
            keyboard TEXT,
            control TEXT,
            memory TEXT,
            oscillators TEXT,
            filter TEXT,
            lfo TEXT,
            effects TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Unreviewed submissions. `manufacturer` here is a free-text name string,
/// not a foreign key; acceptance resolves it to a manufacturers row.
async fn create_suggestions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS suggestions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            manufacturer TEXT NOT NULL,
            year_produced INTEGER NOT NULL,
            image TEXT NOT NULL,
            polyphony TEXT,
            keyboard TEXT,
            control TEXT,
            memory TEXT,
            oscillators TEXT,
            filter TEXT,
            lfo TEXT,
            effects TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// One issued key per requesting email.
async fn create_api_keys_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS api_keys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL COLLATE NOCASE UNIQUE,
            key TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory database")
    }

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let pool = memory_pool().await;

        init_schema(&pool).await.expect("First init failed");
        init_schema(&pool).await.expect("Second init failed");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in ["manufacturers", "synths", "specifications", "suggestions", "api_keys"] {
            assert!(names.contains(&expected), "missing table {}", expected);
        }
    }

    #[tokio::test]
    async fn test_manufacturer_name_unique_case_insensitive() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO manufacturers (manufacturer) VALUES ('Roland')")
            .execute(&pool)
            .await
            .unwrap();

        let duplicate = sqlx::query("INSERT INTO manufacturers (manufacturer) VALUES ('ROLAND')")
            .execute(&pool)
            .await;

        assert!(duplicate.is_err(), "case-insensitive duplicate should be rejected");
    }

    #[tokio::test]
    async fn test_synth_name_unique() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO synths (name) VALUES ('Prodigy')")
            .execute(&pool)
            .await
            .unwrap();

        let duplicate = sqlx::query("INSERT INTO synths (name) VALUES ('prodigy')")
            .execute(&pool)
            .await;

        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_init_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("synthdb.db");

        let pool = init_database(&db_path).await.expect("init_database failed");

        assert!(db_path.exists());

        // Schema is usable immediately
        sqlx::query("INSERT INTO suggestions (name, manufacturer, year_produced, image) VALUES ('MS-20', 'Korg', 1978, 'url')")
            .execute(&pool)
            .await
            .unwrap();
    }
}
