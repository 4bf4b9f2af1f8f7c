use rand::{Rng, RngCore};
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::queries;
use crate::engine::Outcome;
use crate::model::EventKind;

// Effective strength is the published stat scaled by an independent uniform
// draw per side.
const STRENGTH_JITTER_MIN: f64 = 0.9;
const STRENGTH_JITTER_MAX: f64 = 1.1;

// Outcome tiers on attacker strength relative to defender strength.
const DECISIVE_RATIO: f64 = 1.3;
const VICTORY_RATIO: f64 = 0.9;
const PYRRHIC_RATIO: f64 = 0.7;

/// Combat result from the attacker's perspective. Purely narrative: no
/// casualties or resource loss follow from the tier, only the event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarOutcome {
    DecisiveVictory,
    Victory,
    PyrrhicVictory,
    Defeat,
}

impl WarOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            WarOutcome::DecisiveVictory => "decisive_victory",
            WarOutcome::Victory => "victory",
            WarOutcome::PyrrhicVictory => "pyrrhic_victory",
            WarOutcome::Defeat => "defeat",
        }
    }
}

impl std::fmt::Display for WarOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WarOutcome {
    pub fn from_strengths(attacker: f64, defender: f64) -> Self {
        if attacker > defender * DECISIVE_RATIO {
            WarOutcome::DecisiveVictory
        } else if attacker > defender * VICTORY_RATIO {
            WarOutcome::Victory
        } else if attacker > defender * PYRRHIC_RATIO {
            WarOutcome::PyrrhicVictory
        } else {
            WarOutcome::Defeat
        }
    }

    /// Verb phrase slotted into "{attacker} attacked {defender} and {verb} them".
    fn result_text(self) -> &'static str {
        match self {
            WarOutcome::DecisiveVictory => "decisively defeated",
            WarOutcome::Victory => "defeated",
            WarOutcome::PyrrhicVictory => "barely defeated",
            WarOutcome::Defeat => "was defeated by",
        }
    }
}

/// Resolve an attack. Rejected when the pair holds an active alliance.
///
/// War is alliance-breaking for all parties: every active alliance touching
/// either belligerent is ended, with the attacker recorded as the breaker.
pub async fn declare_war(
    conn: &mut SqliteConnection,
    rng: &mut dyn RngCore,
    attacker_id: i64,
    defender_id: i64,
    now: i64,
) -> Result<Outcome, sqlx::Error> {
    if queries::active_alliance_between(&mut *conn, attacker_id, defender_id)
        .await?
        .is_some()
    {
        return Ok(Outcome::Rejected {
            reason: "Cannot declare war on an ally",
        });
    }

    let attacker_army = queries::army(&mut *conn, attacker_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    let defender_army = queries::army(&mut *conn, defender_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let attacker_strength =
        attacker_army.attack_power as f64 * rng.random_range(STRENGTH_JITTER_MIN..STRENGTH_JITTER_MAX);
    let defender_strength =
        defender_army.defense as f64 * rng.random_range(STRENGTH_JITTER_MIN..STRENGTH_JITTER_MAX);
    let outcome = WarOutcome::from_strengths(attacker_strength, defender_strength);

    let attacker_name = queries::country_name(&mut *conn, attacker_id).await?;
    let defender_name = queries::country_name(&mut *conn, defender_id).await?;
    let description = format!(
        "{attacker_name} attacked {defender_name} and {} them",
        outcome.result_text()
    );

    queries::record_event(
        &mut *conn,
        EventKind::War,
        &description,
        Some(attacker_id),
        Some(defender_id),
        now,
    )
    .await?;

    sqlx::query(
        "UPDATE alliances SET end_date = ?, broken_by = ? \
         WHERE (country1_id IN (?3, ?4) OR country2_id IN (?3, ?4)) \
           AND end_date IS NULL",
    )
    .bind(now)
    .bind(attacker_id)
    .bind(attacker_id)
    .bind(defender_id)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(
        attacker = %attacker_name,
        defender = %defender_name,
        outcome = %outcome,
        "war resolved"
    );
    Ok(Outcome::Done { description })
}

/// Form an alliance between two countries. Order-independent; rejected when
/// the pair already holds an active one.
pub async fn propose_alliance(
    conn: &mut SqliteConnection,
    country1_id: i64,
    country2_id: i64,
    now: i64,
) -> Result<Outcome, sqlx::Error> {
    if queries::active_alliance_between(&mut *conn, country1_id, country2_id)
        .await?
        .is_some()
    {
        return Ok(Outcome::Rejected {
            reason: "Already allied",
        });
    }

    sqlx::query("INSERT INTO alliances (country1_id, country2_id, start_date) VALUES (?, ?, ?)")
        .bind(country1_id)
        .bind(country2_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

    let name1 = queries::country_name(&mut *conn, country1_id).await?;
    let name2 = queries::country_name(&mut *conn, country2_id).await?;
    let description = format!("{name1} and {name2} formed an alliance");

    queries::record_event(
        &mut *conn,
        EventKind::Alliance,
        &description,
        Some(country1_id),
        Some(country2_id),
        now,
    )
    .await?;

    Ok(Outcome::Done { description })
}

/// One-way gold transfer, diplomatically framed. Rejected when the sender's
/// stock does not cover the amount.
pub async fn send_tribute(
    conn: &mut SqliteConnection,
    sender_id: i64,
    receiver_id: i64,
    amount: i64,
    now: i64,
) -> Result<Outcome, sqlx::Error> {
    let sender_resources = queries::resources(&mut *conn, sender_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    if sender_resources.stocks.gold < amount {
        return Ok(Outcome::Rejected {
            reason: "Insufficient gold",
        });
    }

    sqlx::query("UPDATE resources SET gold = gold - ? WHERE country_id = ?")
        .bind(amount)
        .bind(sender_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE resources SET gold = gold + ? WHERE country_id = ?")
        .bind(amount)
        .bind(receiver_id)
        .execute(&mut *conn)
        .await?;

    let sender_name = queries::country_name(&mut *conn, sender_id).await?;
    let receiver_name = queries::country_name(&mut *conn, receiver_id).await?;
    let description = format!("{sender_name} sent {amount} gold tribute to {receiver_name}");

    queries::record_event(
        &mut *conn,
        EventKind::Tribute,
        &description,
        Some(sender_id),
        Some(receiver_id),
        now,
    )
    .await?;

    Ok(Outcome::Done { description })
}

/// End an alliance by choice, recording the breaker. Ended alliances stay in
/// history; only an active row can be broken.
pub async fn break_alliance(
    conn: &mut SqliteConnection,
    alliance_id: i64,
    breaker_id: i64,
    now: i64,
) -> Result<Outcome, sqlx::Error> {
    let Some(alliance) = queries::active_alliance(&mut *conn, alliance_id).await? else {
        return Ok(Outcome::Rejected {
            reason: "Alliance not found or already broken",
        });
    };

    sqlx::query("UPDATE alliances SET end_date = ?, broken_by = ? WHERE id = ?")
        .bind(now)
        .bind(breaker_id)
        .bind(alliance_id)
        .execute(&mut *conn)
        .await?;

    let victim_id = alliance.partner_of(breaker_id);
    let breaker_name = queries::country_name(&mut *conn, breaker_id).await?;
    let victim_name = queries::country_name(&mut *conn, victim_id).await?;
    let description = format!("{breaker_name} betrayed and broke alliance with {victim_name}");

    queries::record_event(
        &mut *conn,
        EventKind::Betrayal,
        &description,
        Some(breaker_id),
        Some(victim_id),
        now,
    )
    .await?;

    Ok(Outcome::Done { description })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_tiers_by_strength_ratio() {
        assert_eq!(
            WarOutcome::from_strengths(131.0, 100.0),
            WarOutcome::DecisiveVictory
        );
        assert_eq!(WarOutcome::from_strengths(100.0, 100.0), WarOutcome::Victory);
        assert_eq!(
            WarOutcome::from_strengths(91.0, 100.0),
            WarOutcome::Victory
        );
        assert_eq!(
            WarOutcome::from_strengths(80.0, 100.0),
            WarOutcome::PyrrhicVictory
        );
        assert_eq!(WarOutcome::from_strengths(70.0, 100.0), WarOutcome::Defeat);
        assert_eq!(WarOutcome::from_strengths(10.0, 100.0), WarOutcome::Defeat);
    }

    #[test]
    fn result_text_matches_tier() {
        assert_eq!(
            WarOutcome::DecisiveVictory.result_text(),
            "decisively defeated"
        );
        assert_eq!(WarOutcome::Defeat.result_text(), "was defeated by");
    }
}
