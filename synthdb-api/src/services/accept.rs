//! Acceptance workflow
//!
//! Promotes a pending suggestion into the normalized catalog: resolve the
//! free-text manufacturer name to a manufacturers row (find-or-create),
//! then create the synth plus its specification. The whole promotion runs
//! inside one transaction; on any failure nothing is written.
//!
//! Manufacturer resolution is insert-first: `INSERT .. ON CONFLICT DO
//! NOTHING` followed by a re-read inside the same transaction, so the
//! unique constraint arbitrates racing acceptances instead of a
//! check-then-insert race.

use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use thiserror::Error;

use crate::db::manufacturers::Manufacturer;
use crate::db::suggestions::{row_to_suggestion, Suggestion};
use crate::db::synths::{Specification, SynthDetail};

/// Acceptance workflow failures
#[derive(Debug, Error)]
pub enum AcceptError {
    /// No suggestion exists for the given id
    #[error("No suggestion found")]
    SuggestionNotFound,

    /// A synth with the suggested name is already in the catalog
    #[error("There already is a synth named like that")]
    DuplicateSynthName,

    /// Database failure (transaction rolled back)
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Promote the suggestion with the given id into the catalog
///
/// On success the suggestion row is deleted and the created synth is
/// returned joined with its specification and manufacturer.
pub async fn accept_suggestion(
    pool: &SqlitePool,
    suggestion_id: i64,
) -> Result<SynthDetail, AcceptError> {
    let mut tx = pool.begin().await?;

    let suggestion = load_suggestion(&mut tx, suggestion_id)
        .await?
        .ok_or(AcceptError::SuggestionNotFound)?;

    let name = suggestion.name.trim().to_string();

    // Hard error, never overwrite or duplicate
    let collision: Option<(i64,)> = sqlx::query_as("SELECT id FROM synths WHERE name = ?")
        .bind(&name)
        .fetch_optional(&mut *tx)
        .await?;
    if collision.is_some() {
        return Err(AcceptError::DuplicateSynthName);
    }

    let manufacturer = resolve_manufacturer(&mut tx, suggestion.manufacturer.trim()).await?;

    let synth_insert = sqlx::query("INSERT INTO synths (name, img, manufacturer_id) VALUES (?, ?, ?)")
        .bind(&name)
        .bind(&suggestion.image)
        .bind(manufacturer.id)
        .execute(&mut *tx)
        .await;
    let synth_id = match synth_insert {
        Ok(result) => result.last_insert_rowid(),
        // A racing acceptance won between our collision check and this insert
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AcceptError::DuplicateSynthName);
        }
        Err(e) => return Err(e.into()),
    };

    let specification_id = sqlx::query(
        r#"
        INSERT INTO specifications (
            synth_id, year_produced,
            polyphony, keyboard, control, memory,
            oscillators, filter, lfo, effects
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(synth_id)
    .bind(suggestion.year_produced)
    .bind(&suggestion.polyphony)
    .bind(&suggestion.keyboard)
    .bind(&suggestion.control)
    .bind(&suggestion.memory)
    .bind(&suggestion.oscillators)
    .bind(&suggestion.filter)
    .bind(&suggestion.lfo)
    .bind(&suggestion.effects)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    // Consumed: the suggestions table stays a pure pending queue
    sqlx::query("DELETE FROM suggestions WHERE id = ?")
        .bind(suggestion_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        suggestion_id,
        synth_id,
        manufacturer_id = manufacturer.id,
        synth_name = %name,
        "Suggestion promoted into catalog"
    );

    Ok(SynthDetail {
        id: synth_id,
        name,
        img: Some(suggestion.image.clone()),
        manufacturer: Some(manufacturer),
        specification: Some(Specification {
            id: specification_id,
            year_produced: suggestion.year_produced,
            polyphony: suggestion.polyphony,
            keyboard: suggestion.keyboard,
            control: suggestion.control,
            memory: suggestion.memory,
            oscillators: suggestion.oscillators,
            filter: suggestion.filter,
            lfo: suggestion.lfo,
            effects: suggestion.effects,
        }),
    })
}

async fn load_suggestion(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<Suggestion>, sqlx::Error> {
    let row = sqlx::query("SELECT * FROM suggestions WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(row.as_ref().map(row_to_suggestion))
}

/// Find-or-create the manufacturer row for a (trimmed) display name
///
/// Re-reads after the conditional insert so the returned record carries the
/// stored casing when a matching row already existed.
async fn resolve_manufacturer(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
) -> Result<Manufacturer, sqlx::Error> {
    let inserted = sqlx::query(
        "INSERT INTO manufacturers (manufacturer) VALUES (?) ON CONFLICT(manufacturer) DO NOTHING",
    )
    .bind(name)
    .execute(&mut **tx)
    .await?;

    let row = sqlx::query("SELECT id, manufacturer FROM manufacturers WHERE manufacturer = ?")
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

    let manufacturer = Manufacturer {
        id: row.get("id"),
        manufacturer: row.get("manufacturer"),
    };

    if inserted.rows_affected() > 0 {
        tracing::debug!(manufacturer_id = manufacturer.id, name, "Created new manufacturer");
    } else {
        tracing::debug!(manufacturer_id = manufacturer.id, name, "Reusing existing manufacturer");
    }

    Ok(manufacturer)
}
