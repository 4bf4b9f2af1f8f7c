use rand::RngCore;
use rand::seq::IndexedRandom;
use sqlx::{Row, SqliteConnection};

use crate::config::GameConfig;
use crate::model::UniqueBonus;

const FOOD_CRITICAL: i64 = 500;
const FOOD_LOW: i64 = 1000;
const GOLD_LOW: i64 = 300;
const LEVEL_GAP: f64 = 1.0;
const ALLIANCE_OVEREXTENSION: i64 = 3;
const ATTACK_LOOKBACK_SECS: i64 = 7 * 24 * 3600;

/// Read-only situational advice for a human player's country. Evaluates a
/// fixed set of triggers and returns one firing tip uniformly at random, or
/// `None` when the country has no non-owner player or nothing fired.
pub async fn generate_tip(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    rng: &mut dyn RngCore,
    country_id: i64,
    now: i64,
) -> Result<Option<String>, sqlx::Error> {
    let Some(row) = sqlx::query(
        "SELECT c.unique_bonus, a.level, r.gold, r.food, \
                (SELECT COUNT(*) FROM alliances al \
                 WHERE (al.country1_id = c.id OR al.country2_id = c.id) \
                   AND al.end_date IS NULL) AS alliance_count \
         FROM players p \
         JOIN countries c ON p.country_id = c.id \
         JOIN armies a ON c.id = a.country_id \
         JOIN resources r ON c.id = r.country_id \
         WHERE p.country_id = ? AND p.telegram_id != ?",
    )
    .bind(country_id)
    .bind(config.owner_telegram_id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let level: i64 = row.try_get("level")?;
    let gold: i64 = row.try_get("gold")?;
    let food: i64 = row.try_get("food")?;
    let alliance_count: i64 = row.try_get("alliance_count")?;
    let bonus: String = row.try_get("unique_bonus")?;

    let mut tips = Vec::new();

    if food < FOOD_CRITICAL {
        tips.push(format!(
            "⚠️ Critical food shortage ({food} units)! Increase food production or risk army desertion."
        ));
    } else if food < FOOD_LOW {
        tips.push(format!(
            "🌾 Low food reserves ({food} units). Consider focusing on food production."
        ));
    }

    if gold < GOLD_LOW {
        tips.push(format!(
            "💰 Treasury running low ({gold} gold). Secure more income sources."
        ));
    }

    let avg_level: f64 = sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(level) FROM armies")
        .fetch_one(&mut *conn)
        .await?
        .unwrap_or(1.0);
    if (level as f64) < avg_level - LEVEL_GAP {
        tips.push(format!(
            "⚔️ Your army (Level {level}) is weaker than regional average (Level {avg_level:.1}). Consider upgrading soon."
        ));
    } else if (level as f64) > avg_level + LEVEL_GAP {
        tips.push(format!(
            "🛡️ Your army (Level {level}) is stronger than neighbors. Perfect time to expand your territory!"
        ));
    }

    if alliance_count == 0 {
        tips.push(
            "🤝 You have no alliances. Forming strategic partnerships could protect you from coordinated attacks."
                .to_string(),
        );
    } else if alliance_count >= ALLIANCE_OVEREXTENSION {
        tips.push(format!(
            "👑 You have {alliance_count} active alliances. Be cautious of overextension and potential betrayal risks."
        ));
    }

    if let Ok(bonus) = UniqueBonus::try_from(bonus) {
        tips.push(bonus_reminder(bonus).to_string());
    }

    let recent_attacks: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM events \
         WHERE event_type = 'war' AND country2_id = ? AND timestamp > ?",
    )
    .bind(country_id)
    .bind(now - ATTACK_LOOKBACK_SECS)
    .fetch_one(&mut *conn)
    .await?;
    if recent_attacks > 0 {
        tips.push(format!(
            "⚔️ You've been attacked {recent_attacks} times recently. Strengthen defenses or seek powerful allies!"
        ));
    }

    Ok(tips.choose(rng).cloned())
}

fn bonus_reminder(bonus: UniqueBonus) -> &'static str {
    match bonus {
        UniqueBonus::CavalrySpeed => {
            "🐎 Remember your Persian cavalry speed bonus when planning rapid strikes!"
        }
        UniqueBonus::FortressDefense => {
            "🏰 Your Roman fortress defense excels in holding cities - let enemies come to you!"
        }
        UniqueBonus::NileBounty => {
            "🌾 Egypt's Nile bounty ensures stable food supply - focus resources on army expansion."
        }
        UniqueBonus::GreatWall => {
            "🧱 China's Great Wall bonus makes border defense highly effective against invasions."
        }
        UniqueBonus::Phalanx => {
            "🛡️ Greek phalanx formation gives infantry advantage - perfect for holding defensive lines."
        }
        UniqueBonus::HangingGardens => {
            "🌿 Babylon's Hanging Gardens boost all resource production - economic powerhouse!"
        }
        UniqueBonus::SiegeMasters => {
            "💥 Assyrian siege masters excel at taking fortified positions - target enemy capitals!"
        }
        UniqueBonus::NavalSupremacy => {
            "⚓ Carthage dominates seas - control coastal regions and trade routes for advantage."
        }
        UniqueBonus::ElephantWarfare => {
            "🐘 Indian war elephants crush infantry formations - devastating in open battles."
        }
        UniqueBonus::CompanionCavalry => {
            "🐎 Macedonian companion cavalry delivers devastating charges - perfect for breaking enemy lines."
        }
        UniqueBonus::IronMasters => {
            "⚒️ Hittite iron mastery ensures superior weapons - maintain technological edge."
        }
        UniqueBonus::TradeNetwork => {
            "💰 Phoenician trade networks generate wealth - fund larger armies than neighbors."
        }
    }
}
