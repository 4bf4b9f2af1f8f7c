//! Typed reads and shared writes. Every function takes an open connection;
//! transaction boundaries belong to the caller.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::model::{Alliance, Army, Country, Event, EventKind, Resources, UniqueBonus};

fn decode_err(column: &str, message: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: message.into(),
    }
}

fn country_from_row(row: &SqliteRow) -> Result<Country, sqlx::Error> {
    let bonus: String = row.try_get("unique_bonus")?;
    Ok(Country {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        is_ai_controlled: row.try_get("is_ai_controlled")?,
        unique_bonus: UniqueBonus::try_from(bonus).map_err(|e| decode_err("unique_bonus", e))?,
        bonus_description: row.try_get("bonus_description")?,
    })
}

fn event_from_row(row: &SqliteRow) -> Result<Event, sqlx::Error> {
    let kind: String = row.try_get("event_type")?;
    Ok(Event {
        id: row.try_get("id")?,
        kind: EventKind::try_from(kind).map_err(|e| decode_err("event_type", e))?,
        description: row.try_get("description")?,
        country1_id: row.try_get("country1_id")?,
        country2_id: row.try_get("country2_id")?,
        timestamp: row.try_get("timestamp")?,
        season_id: row.try_get("season_id")?,
    })
}

pub async fn country(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<Option<Country>, sqlx::Error> {
    sqlx::query(
        "SELECT id, name, is_ai_controlled, unique_bonus, bonus_description \
         FROM countries WHERE id = ?",
    )
    .bind(country_id)
    .fetch_optional(&mut *conn)
    .await?
    .map(|row| country_from_row(&row))
    .transpose()
}

/// Display name lookup. A dangling country id is a store-integrity failure
/// and surfaces as `RowNotFound`.
pub async fn country_name(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<String, sqlx::Error> {
    sqlx::query_scalar("SELECT name FROM countries WHERE id = ?")
        .bind(country_id)
        .fetch_one(conn)
        .await
}

pub async fn army(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<Option<Army>, sqlx::Error> {
    sqlx::query_as::<_, Army>(
        "SELECT country_id, level, attack_power, defense, speed, last_upgrade \
         FROM armies WHERE country_id = ?",
    )
    .bind(country_id)
    .fetch_optional(conn)
    .await
}

pub async fn resources(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<Option<Resources>, sqlx::Error> {
    sqlx::query_as::<_, Resources>(
        "SELECT country_id, gold, iron, stone, food, last_collected \
         FROM resources WHERE country_id = ?",
    )
    .bind(country_id)
    .fetch_optional(conn)
    .await
}

/// The active alliance between a pair, order-independent.
pub async fn active_alliance_between(
    conn: &mut SqliteConnection,
    a: i64,
    b: i64,
) -> Result<Option<Alliance>, sqlx::Error> {
    sqlx::query_as::<_, Alliance>(
        "SELECT id, country1_id, country2_id, start_date, end_date, broken_by \
         FROM alliances \
         WHERE ((country1_id = ?1 AND country2_id = ?2) OR (country1_id = ?2 AND country2_id = ?1)) \
           AND end_date IS NULL",
    )
    .bind(a)
    .bind(b)
    .fetch_optional(conn)
    .await
}

pub async fn active_alliance(
    conn: &mut SqliteConnection,
    alliance_id: i64,
) -> Result<Option<Alliance>, sqlx::Error> {
    sqlx::query_as::<_, Alliance>(
        "SELECT id, country1_id, country2_id, start_date, end_date, broken_by \
         FROM alliances WHERE id = ? AND end_date IS NULL",
    )
    .bind(alliance_id)
    .fetch_optional(conn)
    .await
}

pub async fn active_season_id(conn: &mut SqliteConnection) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM seasons WHERE is_active = 1 LIMIT 1")
        .fetch_optional(conn)
        .await
}

/// Append an event to the log, attached to the active season if one exists.
/// Returns the event id.
pub async fn record_event(
    conn: &mut SqliteConnection,
    kind: EventKind,
    description: &str,
    country1_id: Option<i64>,
    country2_id: Option<i64>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO events (event_type, description, country1_id, country2_id, timestamp, season_id) \
         VALUES (?, ?, ?, ?, ?, (SELECT id FROM seasons WHERE is_active = 1 LIMIT 1))",
    )
    .bind(kind.as_str())
    .bind(description)
    .bind(country1_id)
    .bind(country2_id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Newest-first page of the event log, for the news feed.
pub async fn recent_events(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, event_type, description, country1_id, country2_id, timestamp, season_id \
         FROM events ORDER BY id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(event_from_row).collect()
}
