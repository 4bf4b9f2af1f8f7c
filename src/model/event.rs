use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventKind {
    War,
    Alliance,
    Betrayal,
    Tribute,
    ArmyUpgrade,
    SeasonStart,
    SeasonEnd,
}

string_enum!(EventKind {
    War => "war",
    Alliance => "alliance",
    Betrayal => "betrayal",
    Tribute => "tribute",
    ArmyUpgrade => "army_upgrade",
    SeasonStart => "season_start",
    SeasonEnd => "season_end",
});

/// An immutable log entry feeding the news channel. Append-only; removed only
/// on full game reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub kind: EventKind,
    pub description: String,
    pub country1_id: Option<i64>,
    pub country2_id: Option<i64>,
    pub timestamp: i64,
    pub season_id: Option<i64>,
}
