//! API key database operations

use anyhow::Result;
use sqlx::SqlitePool;

/// Insert an issued key, once per email
///
/// Returns `false` if a key already exists for this email (the unique
/// constraint on `email` arbitrates, also under racing requests).
pub async fn insert_key(pool: &SqlitePool, email: &str, key: &str) -> Result<bool> {
    let result = sqlx::query("INSERT INTO api_keys (email, key) VALUES (?, ?)")
        .bind(email.trim())
        .bind(key)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
