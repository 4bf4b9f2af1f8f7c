use serde::{Deserialize, Serialize};

/// A country's army, one row per country. Stats are deterministic functions
/// of level and the country's unique bonus; mutated only by the upgrade
/// operation and season resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Army {
    pub country_id: i64,
    pub level: i64,
    pub attack_power: i64,
    pub defense: i64,
    pub speed: i64,
    pub last_upgrade: i64,
}
