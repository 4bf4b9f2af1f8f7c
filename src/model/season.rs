use serde::{Deserialize, Serialize};

/// A bounded play period. At most one row is active system-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Season {
    pub id: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub winner_country_id: Option<i64>,
    pub winner_player_id: Option<i64>,
    pub is_active: bool,
}
