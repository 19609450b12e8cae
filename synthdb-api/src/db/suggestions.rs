//! Suggestion database operations
//!
//! Suggestions are the denormalized intake records: `manufacturer` is a
//! free-text name string, resolved to a manufacturers row only when the
//! acceptance workflow promotes the suggestion.

use anyhow::Result;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Stored suggestion awaiting moderation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub year_produced: i64,
    pub image: String,
    pub polyphony: Option<String>,
    pub keyboard: Option<String>,
    pub control: Option<String>,
    pub memory: Option<String>,
    pub oscillators: Option<String>,
    pub filter: Option<String>,
    pub lfo: Option<String>,
    pub effects: Option<String>,
}

/// Validated intake payload
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub name: String,
    pub manufacturer: String,
    pub year_produced: i64,
    pub image: String,
    pub polyphony: Option<String>,
    pub keyboard: Option<String>,
    pub control: Option<String>,
    pub memory: Option<String>,
    pub oscillators: Option<String>,
    pub filter: Option<String>,
    pub lfo: Option<String>,
    pub effects: Option<String>,
}

/// Persist one suggestion and return the stored record
pub async fn insert(pool: &SqlitePool, new: &NewSuggestion) -> Result<Suggestion> {
    let id = sqlx::query(
        r#"
        INSERT INTO suggestions (
            name, manufacturer, year_produced, image,
            polyphony, keyboard, control, memory,
            oscillators, filter, lfo, effects
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.name)
    .bind(&new.manufacturer)
    .bind(new.year_produced)
    .bind(&new.image)
    .bind(&new.polyphony)
    .bind(&new.keyboard)
    .bind(&new.control)
    .bind(&new.memory)
    .bind(&new.oscillators)
    .bind(&new.filter)
    .bind(&new.lfo)
    .bind(&new.effects)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Suggestion {
        id,
        name: new.name.clone(),
        manufacturer: new.manufacturer.clone(),
        year_produced: new.year_produced,
        image: new.image.clone(),
        polyphony: new.polyphony.clone(),
        keyboard: new.keyboard.clone(),
        control: new.control.clone(),
        memory: new.memory.clone(),
        oscillators: new.oscillators.clone(),
        filter: new.filter.clone(),
        lfo: new.lfo.clone(),
        effects: new.effects.clone(),
    })
}

/// Load one suggestion by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Suggestion>> {
    let row = sqlx::query("SELECT * FROM suggestions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(row_to_suggestion))
}

pub(crate) fn row_to_suggestion(row: &SqliteRow) -> Suggestion {
    Suggestion {
        id: row.get("id"),
        name: row.get("name"),
        manufacturer: row.get("manufacturer"),
        year_produced: row.get("year_produced"),
        image: row.get("image"),
        polyphony: row.get("polyphony"),
        keyboard: row.get("keyboard"),
        control: row.get("control"),
        memory: row.get("memory"),
        oscillators: row.get("oscillators"),
        filter: row.get("filter"),
        lfo: row.get("lfo"),
        effects: row.get("effects"),
    }
}
