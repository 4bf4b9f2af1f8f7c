use serde::{Deserialize, Serialize};

/// Per-country bonus tag selecting a fixed multiplicative modifier applied
/// during army upgrades. Bonuses without a combat-stat effect (economic or
/// flavor bonuses) leave all multipliers at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UniqueBonus {
    CavalrySpeed,
    FortressDefense,
    NileBounty,
    GreatWall,
    Phalanx,
    HangingGardens,
    SiegeMasters,
    NavalSupremacy,
    ElephantWarfare,
    CompanionCavalry,
    IronMasters,
    TradeNetwork,
}

string_enum!(UniqueBonus {
    CavalrySpeed => "cavalry_speed",
    FortressDefense => "fortress_defense",
    NileBounty => "nile_bounty",
    GreatWall => "great_wall",
    Phalanx => "phalanx",
    HangingGardens => "hanging_gardens",
    SiegeMasters => "siege_masters",
    NavalSupremacy => "naval_supremacy",
    ElephantWarfare => "elephant_warfare",
    CompanionCavalry => "companion_cavalry",
    IronMasters => "iron_masters",
    TradeNetwork => "trade_network",
});

impl UniqueBonus {
    /// Multipliers applied to (attack, defense, speed) when an army levels up.
    pub fn stat_multipliers(&self) -> (f64, f64, f64) {
        match self {
            UniqueBonus::CavalrySpeed => (1.0, 1.0, 1.2),
            UniqueBonus::FortressDefense => (1.0, 1.25, 1.0),
            UniqueBonus::Phalanx => (1.2, 1.0, 1.0),
            UniqueBonus::SiegeMasters => (1.25, 1.0, 1.0),
            UniqueBonus::ElephantWarfare => (1.2, 1.0, 1.0),
            UniqueBonus::CompanionCavalry => (1.25, 1.0, 1.15),
            _ => (1.0, 1.0, 1.0),
        }
    }
}

/// A nation in the world. Created once at world initialization from the
/// configured roster; the AI flag flips off when a human player is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub is_ai_controlled: bool,
    pub unique_bonus: UniqueBonus,
    pub bonus_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_snake_case_round_trips() {
        for bonus in [
            UniqueBonus::CavalrySpeed,
            UniqueBonus::FortressDefense,
            UniqueBonus::NileBounty,
            UniqueBonus::GreatWall,
            UniqueBonus::Phalanx,
            UniqueBonus::HangingGardens,
            UniqueBonus::SiegeMasters,
            UniqueBonus::NavalSupremacy,
            UniqueBonus::ElephantWarfare,
            UniqueBonus::CompanionCavalry,
            UniqueBonus::IronMasters,
            UniqueBonus::TradeNetwork,
        ] {
            let json = serde_json::to_string(&bonus).unwrap();
            let back: UniqueBonus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, bonus);
        }
    }

    #[test]
    fn bonus_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&UniqueBonus::CompanionCavalry).unwrap(),
            "\"companion_cavalry\""
        );
    }

    #[test]
    fn unknown_bonus_rejected() {
        assert!(serde_json::from_str::<UniqueBonus>("\"dragon_riders\"").is_err());
    }

    #[test]
    fn combat_bonuses_touch_expected_stats() {
        assert_eq!(UniqueBonus::CavalrySpeed.stat_multipliers(), (1.0, 1.0, 1.2));
        assert_eq!(
            UniqueBonus::FortressDefense.stat_multipliers(),
            (1.0, 1.25, 1.0)
        );
        assert_eq!(
            UniqueBonus::CompanionCavalry.stat_multipliers(),
            (1.25, 1.0, 1.15)
        );
        // Economic bonuses leave army stats untouched
        assert_eq!(UniqueBonus::TradeNetwork.stat_multipliers(), (1.0, 1.0, 1.0));
        assert_eq!(UniqueBonus::NileBounty.stat_multipliers(), (1.0, 1.0, 1.0));
    }
}
