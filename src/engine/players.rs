use sqlx::SqliteConnection;

use crate::config::GameConfig;
use crate::db::queries;
use crate::engine::{Outcome, army};

/// Ensure a player row exists for this chat identity, refreshing
/// `last_active`. Returns the player id.
pub async fn register_player(
    conn: &mut SqliteConnection,
    telegram_id: i64,
    username: Option<&str>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query(
        "INSERT INTO players (telegram_id, username, is_owner, joined_at, last_active) \
         VALUES (?, ?, 0, ?, ?) \
         ON CONFLICT(telegram_id) DO UPDATE SET last_active = excluded.last_active",
    )
    .bind(telegram_id)
    .bind(username)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query_scalar("SELECT id FROM players WHERE telegram_id = ?")
        .bind(telegram_id)
        .fetch_one(conn)
        .await
}

/// Hand an AI-controlled country to a human player. Rejected when the country
/// does not exist or is already human-ruled.
pub async fn assign_country(
    conn: &mut SqliteConnection,
    telegram_id: i64,
    country_id: i64,
    now: i64,
) -> Result<Outcome, sqlx::Error> {
    let Some(country) = queries::country(&mut *conn, country_id).await? else {
        return Ok(Outcome::Rejected {
            reason: "Country not found",
        });
    };
    if !country.is_ai_controlled {
        return Ok(Outcome::Rejected {
            reason: "Country already taken",
        });
    }

    register_player(&mut *conn, telegram_id, None, now).await?;

    sqlx::query("UPDATE countries SET is_ai_controlled = 0 WHERE id = ?")
        .bind(country_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE players SET country_id = ?, last_active = ? WHERE telegram_id = ?")
        .bind(country_id)
        .bind(now)
        .bind(telegram_id)
        .execute(&mut *conn)
        .await?;

    tracing::info!(country = %country.name, telegram_id, "country assigned");
    Ok(Outcome::Done {
        description: format!("{} is now under human rule", country.name),
    })
}

/// Owner command: revert every country to AI control, unassign all players,
/// wipe alliances, events, and seasons, and restore starting armies and
/// resources.
pub async fn reset_game(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE countries SET is_ai_controlled = 1")
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE players SET country_id = NULL")
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM events").execute(&mut *conn).await?;
    sqlx::query("DELETE FROM alliances")
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM seasons")
        .execute(&mut *conn)
        .await?;

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

    tracing::warn!("game reset to initial state");
    Ok(())
}
