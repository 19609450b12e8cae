//! Synth database operations
//!
//! Reads always join the one-to-one specification and the owning
//! manufacturer so a synth comes back as a complete catalog record.

use anyhow::Result;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::manufacturers::Manufacturer;

/// Specification attributes attached to a synth
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    pub id: i64,
    pub year_produced: i64,
    pub polyphony: Option<String>,
    pub keyboard: Option<String>,
    pub control: Option<String>,
    pub memory: Option<String>,
    pub oscillators: Option<String>,
    pub filter: Option<String>,
    pub lfo: Option<String>,
    pub effects: Option<String>,
}

/// Synth joined with its specification and manufacturer
#[derive(Debug, Clone, Serialize)]
pub struct SynthDetail {
    pub id: i64,
    pub name: String,
    pub img: Option<String>,
    pub manufacturer: Option<Manufacturer>,
    pub specification: Option<Specification>,
}

/// Optional exact-match filters, combined with AND
#[derive(Debug, Clone, Default)]
pub struct SynthFilters {
    pub manufacturer: Option<String>,
    pub year_produced: Option<i64>,
    pub polyphony: Option<String>,
    pub keyboard: Option<String>,
    pub control: Option<String>,
    pub memory: Option<String>,
    pub oscillators: Option<String>,
    pub filter: Option<String>,
    pub lfo: Option<String>,
    pub effects: Option<String>,
}

impl SynthFilters {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none()
            && self.year_produced.is_none()
            && self.polyphony.is_none()
            && self.keyboard.is_none()
            && self.control.is_none()
            && self.memory.is_none()
            && self.oscillators.is_none()
            && self.filter.is_none()
            && self.lfo.is_none()
            && self.effects.is_none()
    }
}

/// Bind value for dynamically assembled filter queries
enum Bind {
    Text(String),
    Int(i64),
}

const SELECT_DETAIL: &str = r#"
    SELECT s.id, s.name, s.img,
           m.id AS m_id, m.manufacturer AS m_name,
           sp.id AS sp_id, sp.year_produced, sp.polyphony, sp.keyboard,
           sp.control, sp.memory, sp.oscillators, sp.filter, sp.lfo, sp.effects
    FROM synths s
    LEFT JOIN specifications sp ON sp.synth_id = s.id
    LEFT JOIN manufacturers m ON m.id = s.manufacturer_id
"#;

const COUNT_DETAIL: &str = r#"
    SELECT COUNT(*)
    FROM synths s
    LEFT JOIN specifications sp ON sp.synth_id = s.id
    LEFT JOIN manufacturers m ON m.id = s.manufacturer_id
"#;

/// Load one page of synths matching the filters, plus the total match count
pub async fn list(
    pool: &SqlitePool,
    filters: &SynthFilters,
    limit: i64,
    offset: i64,
) -> Result<(i64, Vec<SynthDetail>)> {
    let (where_clause, binds) = build_where(filters);

    let count_sql = format!("{COUNT_DETAIL} {where_clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for bind in &binds {
        count_query = match bind {
            Bind::Text(s) => count_query.bind(s.clone()),
            Bind::Int(i) => count_query.bind(*i),
        };
    }
    let count = count_query.fetch_one(pool).await?;

    let rows_sql = format!("{SELECT_DETAIL} {where_clause} ORDER BY s.id LIMIT ? OFFSET ?");
    let mut rows_query = sqlx::query(&rows_sql);
    for bind in &binds {
        rows_query = match bind {
            Bind::Text(s) => rows_query.bind(s.clone()),
            Bind::Int(i) => rows_query.bind(*i),
        };
    }
    let rows = rows_query
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok((count, rows.iter().map(row_to_detail).collect()))
}

/// Look up one synth by an ambiguous identifier (integer token = primary
/// key, anything else = name, case-insensitive and trimmed)
pub async fn find_by_ident(pool: &SqlitePool, ident: &str) -> Result<Option<SynthDetail>> {
    let trimmed = ident.trim();
    let row = if let Ok(id) = trimmed.parse::<i64>() {
        let sql = format!("{SELECT_DETAIL} WHERE s.id = ?");
        sqlx::query(&sql).bind(id).fetch_optional(pool).await?
    } else {
        let sql = format!("{SELECT_DETAIL} WHERE s.name = ?");
        sqlx::query(&sql).bind(trimmed).fetch_optional(pool).await?
    };

    Ok(row.as_ref().map(row_to_detail))
}

fn build_where(filters: &SynthFilters) -> (String, Vec<Bind>) {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut binds = Vec::new();

    if let Some(name) = &filters.manufacturer {
        conditions.push("m.manufacturer = ?");
        binds.push(Bind::Text(name.trim().to_string()));
    }
    if let Some(year) = filters.year_produced {
        conditions.push("sp.year_produced = ?");
        binds.push(Bind::Int(year));
    }

    let text_filters = [
        ("sp.polyphony = ?", &filters.polyphony),
        ("sp.keyboard = ?", &filters.keyboard),
        ("sp.control = ?", &filters.control),
        ("sp.memory = ?", &filters.memory),
        ("sp.oscillators = ?", &filters.oscillators),
        ("sp.filter = ?", &filters.filter),
        ("sp.lfo = ?", &filters.lfo),
        ("sp.effects = ?", &filters.effects),
    ];
    for (condition, value) in text_filters {
        if let Some(value) = value {
            conditions.push(condition);
            binds.push(Bind::Text(value.clone()));
        }
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), binds)
    }
}

fn row_to_detail(row: &SqliteRow) -> SynthDetail {
    let manufacturer = row
        .get::<Option<i64>, _>("m_id")
        .map(|id| Manufacturer {
            id,
            manufacturer: row.get("m_name"),
        });

    let specification = row
        .get::<Option<i64>, _>("sp_id")
        .map(|id| Specification {
            id,
            year_produced: row.get("year_produced"),
            polyphony: row.get("polyphony"),
            keyboard: row.get("keyboard"),
            control: row.get("control"),
            memory: row.get("memory"),
            oscillators: row.get("oscillators"),
            filter: row.get("filter"),
            lfo: row.get("lfo"),
            effects: row.get("effects"),
        });

    SynthDetail {
        id: row.get("id"),
        name: row.get("name"),
        img: row.get("img"),
        manufacturer,
        specification,
    }
}
