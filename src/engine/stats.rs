use serde::Serialize;
use sqlx::{Row, SqliteConnection};

use crate::model::UniqueBonus;

const WAR_WINDOW_SECS: i64 = 30 * 24 * 3600;

/// Everything the presentation layer shows about a country in one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryOverview {
    pub id: i64,
    pub name: String,
    pub is_ai_controlled: bool,
    pub unique_bonus: UniqueBonus,
    pub bonus_description: String,
    pub level: i64,
    pub attack_power: i64,
    pub defense: i64,
    pub speed: i64,
    pub gold: i64,
    pub iron: i64,
    pub stone: i64,
    pub food: i64,
    pub alliance_count: i64,
    /// Wars this country started in the last 30 days.
    pub attacks_launched: i64,
    /// Wars declared against this country in the last 30 days.
    pub attacks_received: i64,
}

pub async fn country_overview(
    conn: &mut SqliteConnection,
    country_id: i64,
    now: i64,
) -> Result<Option<CountryOverview>, sqlx::Error> {
    let cutoff = now - WAR_WINDOW_SECS;
    let Some(row) = sqlx::query(
        "SELECT c.id, c.name, c.is_ai_controlled, c.unique_bonus, c.bonus_description, \
                a.level, a.attack_power, a.defense, a.speed, \
                r.gold, r.iron, r.stone, r.food, \
                (SELECT COUNT(*) FROM alliances al \
                 WHERE (al.country1_id = c.id OR al.country2_id = c.id) \
                   AND al.end_date IS NULL) AS alliance_count, \
                (SELECT COUNT(*) FROM events e \
                 WHERE e.country1_id = c.id AND e.event_type = 'war' \
                   AND e.timestamp > ?2) AS attacks_launched, \
                (SELECT COUNT(*) FROM events e \
                 WHERE e.country2_id = c.id AND e.event_type = 'war' \
                   AND e.timestamp > ?2) AS attacks_received \
         FROM countries c \
         JOIN armies a ON c.id = a.country_id \
         JOIN resources r ON c.id = r.country_id \
         WHERE c.id = ?1",
    )
    .bind(country_id)
    .bind(cutoff)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let bonus: String = row.try_get("unique_bonus")?;
    let unique_bonus = UniqueBonus::try_from(bonus).map_err(|e| sqlx::Error::ColumnDecode {
        index: "unique_bonus".to_string(),
        source: e.into(),
    })?;

    Ok(Some(CountryOverview {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        is_ai_controlled: row.try_get("is_ai_controlled")?,
        unique_bonus,
        bonus_description: row.try_get("bonus_description")?,
        level: row.try_get("level")?,
        attack_power: row.try_get("attack_power")?,
        defense: row.try_get("defense")?,
        speed: row.try_get("speed")?,
        gold: row.try_get("gold")?,
        iron: row.try_get("iron")?,
        stone: row.try_get("stone")?,
        food: row.try_get("food")?,
        alliance_count: row.try_get("alliance_count")?,
        attacks_launched: row.try_get("attacks_launched")?,
        attacks_received: row.try_get("attacks_received")?,
    }))
}
