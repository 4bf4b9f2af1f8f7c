use serde::{Deserialize, Serialize};

/// A bundle of the four resource quantities. Reused for stocks, hourly
/// production rates, storage caps, starting values, and upgrade costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Stockpile {
    pub gold: i64,
    pub iron: i64,
    pub stone: i64,
    pub food: i64,
}

impl Stockpile {
    pub const fn new(gold: i64, iron: i64, stone: i64, food: i64) -> Self {
        Self {
            gold,
            iron,
            stone,
            food,
        }
    }

    /// True if every component covers the corresponding component of `cost`.
    pub fn covers(&self, cost: &Stockpile) -> bool {
        self.gold >= cost.gold
            && self.iron >= cost.iron
            && self.stone >= cost.stone
            && self.food >= cost.food
    }

    /// Component-wise minimum against per-resource ceilings.
    pub fn clamped(&self, caps: &Stockpile) -> Stockpile {
        Stockpile {
            gold: self.gold.min(caps.gold),
            iron: self.iron.min(caps.iron),
            stone: self.stone.min(caps.stone),
            food: self.food.min(caps.food),
        }
    }
}

/// A country's current stocks, one row per country.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Resources {
    pub country_id: i64,
    #[sqlx(flatten)]
    pub stocks: Stockpile,
    pub last_collected: i64,
}
