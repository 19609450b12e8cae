//! Manufacturer database operations

use anyhow::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Manufacturer record
#[derive(Debug, Clone, Serialize)]
pub struct Manufacturer {
    pub id: i64,
    pub manufacturer: String,
}

/// Load one page of manufacturers plus the total count
///
/// The count is the full table total, independent of the page window.
pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> Result<(i64, Vec<Manufacturer>)> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(
        "SELECT id, manufacturer FROM manufacturers ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let manufacturers = rows
        .iter()
        .map(|row| Manufacturer {
            id: row.get("id"),
            manufacturer: row.get("manufacturer"),
        })
        .collect();

    Ok((count, manufacturers))
}

/// Look up a manufacturer by an ambiguous identifier
///
/// An integer token is treated as a primary key, anything else as a name
/// (case-insensitive, trimmed).
pub async fn find_by_ident(pool: &SqlitePool, ident: &str) -> Result<Option<Manufacturer>> {
    let row = if let Ok(id) = ident.trim().parse::<i64>() {
        sqlx::query("SELECT id, manufacturer FROM manufacturers WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
    } else {
        sqlx::query("SELECT id, manufacturer FROM manufacturers WHERE manufacturer = ?")
            .bind(ident.trim())
            .fetch_optional(pool)
            .await?
    };

    Ok(row.map(|row| Manufacturer {
        id: row.get("id"),
        manufacturer: row.get("manufacturer"),
    }))
}
