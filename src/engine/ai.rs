use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore};
use serde::Serialize;
use sqlx::{Row, SqliteConnection};

use crate::config::GameConfig;
use crate::engine::{army, diplomacy};
use crate::model::Stockpile;

/// One action taken by an AI country during a decision pass, for broadcast by
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AiAction {
    ArmyUpgrade { country: String, level: i64 },
    WarDeclared { attacker: String, defender: String },
    AllianceProposed { country1: String, country2: String },
    TributeSent { sender: String, receiver: String },
}

struct AiCountry {
    id: i64,
    name: String,
    level: i64,
    attack_power: i64,
    stocks: Stockpile,
}

#[derive(Clone)]
struct Candidate {
    id: i64,
    name: String,
    level: i64,
    gold: i64,
}

fn roll(rng: &mut dyn RngCore, probability: f64) -> bool {
    rng.random_range(0.0..1.0) < probability
}

/// One decision per AI country per pass, first qualifying branch wins:
/// upgrade the army, else evaluate diplomacy against a random sample of
/// non-allied candidates (attack the weak, ally, or appease the rich with
/// tribute). Snapshots are taken at pass start; the upgrade re-validates
/// against live state before spending.
pub async fn decision_pass(
    conn: &mut SqliteConnection,
    config: &GameConfig,
    rng: &mut dyn RngCore,
    now: i64,
) -> Result<Vec<AiAction>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT c.id, c.name, a.level, a.attack_power, r.gold, r.iron, r.stone, r.food \
         FROM countries c \
         JOIN armies a ON c.id = a.country_id \
         JOIN resources r ON c.id = r.country_id \
         WHERE c.is_ai_controlled = 1",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut ai_countries = Vec::with_capacity(rows.len());
    for row in rows {
        ai_countries.push(AiCountry {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            level: row.try_get("level")?,
            attack_power: row.try_get("attack_power")?,
            stocks: Stockpile {
                gold: row.try_get("gold")?,
                iron: row.try_get("iron")?,
                stone: row.try_get("stone")?,
                food: row.try_get("food")?,
            },
        });
    }

    let tuning = &config.ai;
    let mut actions = Vec::new();

    for ai in &ai_countries {
        // Branch 1: upgrade the army.
        if ai.level < config.max_army_level && roll(rng, tuning.upgrade_chance) {
            if let Some(cost) = config.upgrade_cost(ai.level + 1) {
                if ai.stocks.covers(cost) {
                    if army::upgrade_army(&mut *conn, config, ai.id, now).await? {
                        actions.push(AiAction::ArmyUpgrade {
                            country: ai.name.clone(),
                            level: ai.level + 1,
                        });
                    }
                    continue;
                }
            }
        }

        // Branch 2: diplomacy against a sampled non-allied candidate.
        if !roll(rng, tuning.diplomacy_chance) {
            continue;
        }

        let mut candidates = load_candidates(&mut *conn, ai.id).await?;
        if candidates.is_empty() {
            continue;
        }
        candidates.shuffle(rng);
        candidates.truncate(tuning.candidate_pool);
        let Some(target) = candidates.choose(rng).cloned() else {
            continue;
        };

        if ai.attack_power > target.level * tuning.war_power_factor
            && roll(rng, tuning.war_chance)
        {
            if diplomacy::declare_war(&mut *conn, rng, ai.id, target.id, now)
                .await?
                .is_done()
            {
                actions.push(AiAction::WarDeclared {
                    attacker: ai.name.clone(),
                    defender: target.name.clone(),
                });
            }
        } else if roll(rng, tuning.alliance_chance) {
            if diplomacy::propose_alliance(&mut *conn, ai.id, target.id, now)
                .await?
                .is_done()
            {
                actions.push(AiAction::AllianceProposed {
                    country1: ai.name.clone(),
                    country2: target.name.clone(),
                });
            }
        } else if target.gold as f64 > ai.stocks.gold as f64 * tuning.tribute_gold_ratio
            && roll(rng, tuning.tribute_chance)
            && ai.stocks.gold >= tuning.tribute_amount
        {
            if diplomacy::send_tribute(&mut *conn, ai.id, target.id, tuning.tribute_amount, now)
                .await?
                .is_done()
            {
                actions.push(AiAction::TributeSent {
                    sender: ai.name.clone(),
                    receiver: target.name.clone(),
                });
            }
        }
    }

    if !actions.is_empty() {
        tracing::info!(actions = actions.len(), "ai decision pass complete");
    }
    Ok(actions)
}

/// Every other country not currently allied with `country_id`.
async fn load_candidates(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<Vec<Candidate>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT c.id, c.name, a.level, r.gold \
         FROM countries c \
         JOIN armies a ON c.id = a.country_id \
         JOIN resources r ON c.id = r.country_id \
         WHERE c.id != ?1 AND NOT EXISTS ( \
             SELECT 1 FROM alliances al \
             WHERE al.end_date IS NULL \
               AND ((al.country1_id = ?1 AND al.country2_id = c.id) \
                 OR (al.country2_id = ?1 AND al.country1_id = c.id)))",
    )
    .bind(country_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut candidates = Vec::with_capacity(rows.len());
    for row in rows {
        candidates.push(Candidate {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            level: row.try_get("level")?,
            gold: row.try_get("gold")?,
        });
    }
    Ok(candidates)
}
