use serde::{Deserialize, Serialize};

/// A pact between two countries. Semantically unordered, stored ordered.
/// Ended rows (`end_date` set) are history and are never deleted; at most one
/// active row may exist per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alliance {
    pub id: i64,
    pub country1_id: i64,
    pub country2_id: i64,
    pub start_date: i64,
    pub end_date: Option<i64>,
    /// Country that ended the pact, for betrayals and war declarations.
    pub broken_by: Option<i64>,
}

impl Alliance {
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// The member that is not `country_id`.
    pub fn partner_of(&self, country_id: i64) -> i64 {
        if self.country1_id == country_id {
            self.country2_id
        } else {
            self.country1_id
        }
    }
}
