//! Game operations. Connection-level functions own no transaction; the
//! `GameEngine` facade is the composition root that opens one per call and
//! commits or rolls back as a unit.

pub mod advisor;
pub mod ai;
pub mod army;
pub mod diplomacy;
pub mod economy;
pub mod players;
pub mod season;
pub mod stats;

use rand::RngCore;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::GameConfig;
use crate::db::{queries, seed};
use crate::model::Event;

pub use ai::AiAction;
pub use diplomacy::WarOutcome;
pub use season::{SeasonClose, SeasonWinner};
pub use stats::CountryOverview;

/// Result of a mutating operation. Domain failures are values, not errors:
/// the reason is surfaced verbatim to the caller, who decides whether to show
/// it to a human or silently skip (AI policy). Only store failures are
/// `Err(sqlx::Error)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Done { description: String },
    Rejected { reason: &'static str },
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Done { description } => description,
            Outcome::Rejected { reason } => reason,
        }
    }
}

/// Facade over the world-state store. One transaction per call; operations
/// composed inside a call (the AI pass) share that transaction.
#[derive(Debug, Clone)]
pub struct GameEngine {
    pool: SqlitePool,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(pool: SqlitePool, config: GameConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Create the country roster, per-country army/resources, and the owner
    /// player on first run. Safe to call at every startup.
    pub async fn init_world(&self, now: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        seed::seed_world(&mut tx, &self.config, now).await?;
        tx.commit().await
    }

    pub async fn collect_resources(&self, now: i64) -> Result<Vec<i64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let updated = economy::collect_resources(&mut tx, &self.config, now).await?;
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn upgrade_army(&self, country_id: i64, now: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let upgraded = army::upgrade_army(&mut tx, &self.config, country_id, now).await?;
        tx.commit().await?;
        Ok(upgraded)
    }

    pub async fn declare_war(
        &self,
        rng: &mut dyn RngCore,
        attacker_id: i64,
        defender_id: i64,
        now: i64,
    ) -> Result<Outcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let outcome = diplomacy::declare_war(&mut tx, rng, attacker_id, defender_id, now).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn propose_alliance(
        &self,
        country1_id: i64,
        country2_id: i64,
        now: i64,
    ) -> Result<Outcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let outcome = diplomacy::propose_alliance(&mut tx, country1_id, country2_id, now).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn send_tribute(
        &self,
        sender_id: i64,
        receiver_id: i64,
        amount: i64,
        now: i64,
    ) -> Result<Outcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let outcome = diplomacy::send_tribute(&mut tx, sender_id, receiver_id, amount, now).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn break_alliance(
        &self,
        alliance_id: i64,
        breaker_id: i64,
        now: i64,
    ) -> Result<Outcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let outcome = diplomacy::break_alliance(&mut tx, alliance_id, breaker_id, now).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    /// One decision per AI country, all inside a single transaction.
    pub async fn ai_decision_pass(
        &self,
        rng: &mut dyn RngCore,
        now: i64,
    ) -> Result<Vec<AiAction>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let actions = ai::decision_pass(&mut tx, &self.config, rng, now).await?;
        tx.commit().await?;
        Ok(actions)
    }

    pub async fn start_season(&self, now: i64) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let season_id = season::start_season(&mut tx, &self.config, now).await?;
        tx.commit().await?;
        Ok(season_id)
    }

    pub async fn end_season(&self, now: i64) -> Result<SeasonClose, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let close = season::end_season(&mut tx, &self.config, now).await?;
        tx.commit().await?;
        Ok(close)
    }

    pub async fn is_season_active(&self) -> Result<bool, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        season::is_season_active(&mut conn).await
    }

    pub async fn country_overview(
        &self,
        country_id: i64,
        now: i64,
    ) -> Result<Option<CountryOverview>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        stats::country_overview(&mut conn, country_id, now).await
    }

    pub async fn advisor_tip(
        &self,
        rng: &mut dyn RngCore,
        country_id: i64,
        now: i64,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        advisor::generate_tip(&mut conn, &self.config, rng, country_id, now).await
    }

    pub async fn recent_events(&self, limit: i64) -> Result<Vec<Event>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        queries::recent_events(&mut conn, limit).await
    }

    pub async fn register_player(
        &self,
        telegram_id: i64,
        username: Option<&str>,
        now: i64,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let player_id = players::register_player(&mut tx, telegram_id, username, now).await?;
        tx.commit().await?;
        Ok(player_id)
    }

    pub async fn assign_country(
        &self,
        telegram_id: i64,
        country_id: i64,
        now: i64,
    ) -> Result<Outcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let outcome = players::assign_country(&mut tx, telegram_id, country_id, now).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    /// Owner command: revert every country to AI control and wipe history.
    pub async fn reset_game(&self, now: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        players::reset_game(&mut tx, &self.config, now).await?;
        tx.commit().await
    }
}
