use sqlx::{Row, SqliteConnection};

use crate::config::GameConfig;
use crate::model::Stockpile;

/// Hourly accrual pass over every country. Countries with less than one
/// elapsed hour since their last collection are skipped; accrual truncates to
/// whole units and stocks clamp to the configured ceilings. Returns the ids
/// of the countries that were updated.
pub async fn collect_resources(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    now: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT r.country_id, r.gold, r.iron, r.stone, r.food, r.last_collected, \
                c.is_ai_controlled \
         FROM resources r \
         JOIN countries c ON r.country_id = c.id",
    )
    .fetch_all(&mut *conn)
    .await?;

    let rates = &config.hourly_production;
    let mut updated = Vec::new();

    for row in rows {
        let last_collected: i64 = row.try_get("last_collected")?;
        let hours = (now - last_collected) as f64 / 3600.0;
        if hours < 1.0 {
            continue;
        }

        let is_ai: bool = row.try_get("is_ai_controlled")?;
        let multiplier = if is_ai {
            config.ai_production_multiplier
        } else {
            1.0
        };
        let accrue = |rate: i64| (rate as f64 * hours * multiplier) as i64;

        let stocks = Stockpile {
            gold: row.try_get::<i64, _>("gold")? + accrue(rates.gold),
            iron: row.try_get::<i64, _>("iron")? + accrue(rates.iron),
            stone: row.try_get::<i64, _>("stone")? + accrue(rates.stone),
            food: row.try_get::<i64, _>("food")? + accrue(rates.food),
        }
        .clamped(&config.resource_caps);

        let country_id: i64 = row.try_get("country_id")?;
        sqlx::query(
            "UPDATE resources \
             SET gold = ?, iron = ?, stone = ?, food = ?, last_collected = ? \
             WHERE country_id = ?",
        )
        .bind(stocks.gold)
        .bind(stocks.iron)
        .bind(stocks.stone)
        .bind(stocks.food)
        .bind(now)
        .bind(country_id)
        .execute(&mut *conn)
        .await?;

        updated.push(country_id);
    }

    if !updated.is_empty() {
        tracing::debug!(countries = updated.len(), "resources collected");
    }
    Ok(updated)
}
