use serde::Serialize;
use sqlx::{Row, SqliteConnection};

use crate::config::GameConfig;
use crate::db::queries;
use crate::engine::army;
use crate::model::EventKind;

/// The strongest human-controlled country at season end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonWinner {
    pub country_id: i64,
    pub country_name: String,
    pub player_id: i64,
    pub telegram_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SeasonClose {
    /// The season was closed; no winner when no human player participated.
    Ended {
        season_id: i64,
        winner: Option<SeasonWinner>,
    },
    NoActiveSeason,
}

/// Open a new season: close any active one, reset every country's resources
/// and army to starting values, and end all active alliances. Returns the new
/// season id.
pub async fn start_season(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query("UPDATE seasons SET end_time = ?, is_active = 0 WHERE is_active = 1")
        .bind(now)
        .execute(&mut *conn)
        .await?;

    let season_id = sqlx::query("INSERT INTO seasons (start_time, is_active) VALUES (?, 1)")
        .bind(now)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    let start = &config.starting_resources;
    sqlx::query(
        "UPDATE resources SET gold = ?, iron = ?, stone = ?, food = ?, last_collected = ?",
    )
    .bind(start.gold)
    .bind(start.iron)
    .bind(start.stone)
    .bind(start.food)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let (attack, defense, speed) = army::base_stats(1);
    sqlx::query(
        "UPDATE armies SET level = 1, attack_power = ?, defense = ?, speed = ?, last_upgrade = ?",
    )
    .bind(attack)
    .bind(defense)
    .bind(speed)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query("UPDATE alliances SET end_date = ? WHERE end_date IS NULL")
        .bind(now)
        .execute(&mut *conn)
        .await?;

    queries::record_event(
        &mut *conn,
        EventKind::SeasonStart,
        "A new season has begun",
        None,
        None,
        now,
    )
    .await?;

    tracing::info!(season_id, "season started");
    Ok(season_id)
}

/// Close the active season, crowning the human-controlled country (owner
/// excluded) with the highest attack_power + defense. Ties break toward the
/// lower country id.
pub async fn end_season(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    now: i64,
) -> Result<SeasonClose, sqlx::Error> {
    let Some(season_id) = queries::active_season_id(&mut *conn).await? else {
        return Ok(SeasonClose::NoActiveSeason);
    };

    let winner_row = sqlx::query(
        "SELECT c.id AS country_id, c.name, p.id AS player_id, p.telegram_id, \
                a.attack_power + a.defense AS power \
         FROM countries c \
         JOIN armies a ON c.id = a.country_id \
         JOIN players p ON p.country_id = c.id \
         WHERE c.is_ai_controlled = 0 AND p.telegram_id != ? \
         ORDER BY power DESC, c.id ASC \
         LIMIT 1",
    )
    .bind(config.owner_telegram_id)
    .fetch_optional(&mut *conn)
    .await?;

    let winner = winner_row
        .map(|row| -> Result<SeasonWinner, sqlx::Error> {
            Ok(SeasonWinner {
                country_id: row.try_get("country_id")?,
                country_name: row.try_get("name")?,
                player_id: row.try_get("player_id")?,
                telegram_id: row.try_get("telegram_id")?,
            })
        })
        .transpose()?;

    let description = match &winner {
        Some(w) => format!("The season has ended. {} emerged victorious", w.country_name),
        None => "The season has ended with no human victor".to_string(),
    };
    queries::record_event(
        &mut *conn,
        EventKind::SeasonEnd,
        &description,
        winner.as_ref().map(|w| w.country_id),
        None,
        now,
    )
    .await?;

    sqlx::query(
        "UPDATE seasons \
         SET end_time = ?, is_active = 0, winner_country_id = ?, winner_player_id = ? \
         WHERE id = ?",
    )
    .bind(now)
    .bind(winner.as_ref().map(|w| w.country_id))
    .bind(winner.as_ref().map(|w| w.player_id))
    .bind(season_id)
    .execute(&mut *conn)
    .await?;

    tracing::info!(season_id, winner = ?winner.as_ref().map(|w| &w.country_name), "season ended");
    Ok(SeasonClose::Ended { season_id, winner })
}

pub async fn is_season_active(conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    Ok(queries::active_season_id(conn).await?.is_some())
}
