use sqlx::SqliteConnection;

use crate::config::GameConfig;
use crate::db::queries;
use crate::model::{EventKind, UniqueBonus};

const STAT_BASE: i64 = 50;
const ATTACK_GROWTH: i64 = 25;
const DEFENSE_GROWTH: i64 = 25;
const SPEED_GROWTH: i64 = 15;

/// Stats before the country bonus: (attack, defense, speed).
pub fn base_stats(level: i64) -> (i64, i64, i64) {
    (
        STAT_BASE + (level - 1) * ATTACK_GROWTH,
        STAT_BASE + (level - 1) * DEFENSE_GROWTH,
        STAT_BASE + (level - 1) * SPEED_GROWTH,
    )
}

/// Stats at `level` with the country's bonus applied, truncated to whole
/// points.
pub fn stats_for(level: i64, bonus: UniqueBonus) -> (i64, i64, i64) {
    let (attack, defense, speed) = base_stats(level);
    let (m_attack, m_defense, m_speed) = bonus.stat_multipliers();
    (
        (attack as f64 * m_attack) as i64,
        (defense as f64 * m_defense) as i64,
        (speed as f64 * m_speed) as i64,
    )
}

/// Level the army up by one if below the cap and the next level's cost is
/// covered. Deducts all four costs and recomputes stats as one unit; returns
/// false (leaving state untouched) otherwise.
pub async fn upgrade_army(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    country_id: i64,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let Some(country) = queries::country(&mut *conn, country_id).await? else {
        return Ok(false);
    };
    let Some(army) = queries::army(&mut *conn, country_id).await? else {
        return Ok(false);
    };
    if army.level >= config.max_army_level {
        return Ok(false);
    }

    let new_level = army.level + 1;
    let Some(cost) = config.upgrade_cost(new_level) else {
        return Ok(false);
    };
    let Some(resources) = queries::resources(&mut *conn, country_id).await? else {
        return Ok(false);
    };
    if !resources.stocks.covers(cost) {
        return Ok(false);
    }

    sqlx::query(
        "UPDATE resources \
         SET gold = gold - ?, iron = iron - ?, stone = stone - ?, food = food - ? \
         WHERE country_id = ?",
    )
    .bind(cost.gold)
    .bind(cost.iron)
    .bind(cost.stone)
    .bind(cost.food)
    .bind(country_id)
    .execute(&mut *conn)
    .await?;

    let (attack, defense, speed) = stats_for(new_level, country.unique_bonus);
    sqlx::query(
        "UPDATE armies \
         SET level = ?, attack_power = ?, defense = ?, speed = ?, last_upgrade = ? \
         WHERE country_id = ?",
    )
    .bind(new_level)
    .bind(attack)
    .bind(defense)
    .bind(speed)
    .bind(now)
    .bind(country_id)
    .execute(&mut *conn)
    .await?;

    queries::record_event(
        &mut *conn,
        EventKind::ArmyUpgrade,
        &format!("Army upgraded to Level {new_level}"),
        Some(country_id),
        None,
        now,
    )
    .await?;

    tracing::debug!(country = %country.name, level = new_level, "army upgraded");
    Ok(true)
}
