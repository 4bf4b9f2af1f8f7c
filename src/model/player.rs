use serde::{Deserialize, Serialize};

/// A chat-platform identity. At most one human player per country and one
/// country per player. The owner is excluded from win conditions and advisor
/// tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub country_id: Option<i64>,
    pub is_owner: bool,
    pub joined_at: i64,
    pub last_active: i64,
}
