use sqlx::SqliteConnection;

use crate::config::GameConfig;

/// Populate an empty world: the configured country roster (all AI-controlled),
/// a level-1 army and starting resources per country, and the owner player.
///
/// Idempotent: existing countries, armies, resources, and the owner row are
/// left alone, so it is safe to run at every startup.
pub async fn seed_world(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    now: i64,
) -> Result<(), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
        .fetch_one(&mut *conn)
        .await?;
    if existing == 0 {
        for spec in &config.roster {
            sqlx::query(
                "INSERT INTO countries (name, is_ai_controlled, unique_bonus, bonus_description, created_at) \
                 VALUES (?, 1, ?, ?, ?)",
            )
            .bind(&spec.name)
            .bind(spec.bonus.as_str())
            .bind(&spec.bonus_description)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        }
        tracing::info!(countries = config.roster.len(), "seeded world roster");
    }

    let owner_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE telegram_id = ?")
        .bind(config.owner_telegram_id)
        .fetch_one(&mut *conn)
        .await?;
    if owner_exists == 0 {
        sqlx::query(
            "INSERT INTO players (telegram_id, username, is_owner, joined_at, last_active) \
             VALUES (?, 'BotOwner', 1, ?, ?)",
        )
        .bind(config.owner_telegram_id)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    let country_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM countries")
        .fetch_all(&mut *conn)
        .await?;
    let start = &config.starting_resources;
    for country_id in country_ids {
        sqlx::query(
            "INSERT INTO armies (country_id, level, attack_power, defense, speed, last_upgrade) \
             VALUES (?, 1, 50, 50, 50, ?) \
             ON CONFLICT(country_id) DO NOTHING",
        )
        .bind(country_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "INSERT INTO resources (country_id, gold, iron, stone, food, last_collected) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(country_id) DO NOTHING",
        )
        .bind(country_id)
        .bind(start.gold)
        .bind(start.iron)
        .bind(start.stone)
        .bind(start.food)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
