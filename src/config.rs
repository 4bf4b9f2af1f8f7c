use crate::model::{Stockpile, UniqueBonus};

/// One roster entry used at world initialization.
#[derive(Debug, Clone)]
pub struct CountrySpec {
    pub name: String,
    pub bonus: UniqueBonus,
    pub bonus_description: String,
}

impl CountrySpec {
    fn new(name: &str, bonus: UniqueBonus, bonus_description: &str) -> Self {
        Self {
            name: name.to_string(),
            bonus,
            bonus_description: bonus_description.to_string(),
        }
    }
}

/// Probability tables and thresholds for the AI decision pass.
///
/// Kept as explicit values so tests can force a branch by pinning the
/// relevant probability to 0.0 or 1.0.
#[derive(Debug, Clone)]
pub struct AiTuning {
    /// Chance to consider an army upgrade this tick.
    pub upgrade_chance: f64,
    /// Chance to evaluate diplomacy when no upgrade happened.
    pub diplomacy_chance: f64,
    /// Chance to attack a candidate weak enough to beat.
    pub war_chance: f64,
    /// Chance to propose an alliance when not attacking.
    pub alliance_chance: f64,
    /// Chance to appease a richer candidate with tribute.
    pub tribute_chance: f64,
    /// How many non-allied candidates to sample per tick.
    pub candidate_pool: usize,
    /// Attack when own attack_power exceeds candidate level times this.
    pub war_power_factor: i64,
    /// Tribute only targets holding more than this multiple of own gold.
    pub tribute_gold_ratio: f64,
    pub tribute_amount: i64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            upgrade_chance: 0.3,
            diplomacy_chance: 0.4,
            war_chance: 0.6,
            alliance_chance: 0.4,
            tribute_chance: 0.2,
            candidate_pool: 5,
            war_power_factor: 60,
            tribute_gold_ratio: 1.5,
            tribute_amount: 500,
        }
    }
}

/// All engine tunables, passed explicitly to every operation that needs them.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Distinguished player identity excluded from win conditions and tips.
    pub owner_telegram_id: i64,
    pub season_duration_days: u32,
    /// Advisor tip cadence, consumed by the external scheduler.
    pub advisor_tip_interval_hours: u32,
    /// AI decision cadence, consumed by the external scheduler.
    pub ai_action_interval_minutes: u32,
    pub starting_resources: Stockpile,
    /// Per-resource accrual per elapsed hour.
    pub hourly_production: Stockpile,
    pub resource_caps: Stockpile,
    /// Unattended-nation bonus: AI countries accrue at this multiple.
    pub ai_production_multiplier: f64,
    pub max_army_level: i64,
    /// Cost to *reach* each level, indexed by level - 1.
    pub upgrade_costs: Vec<Stockpile>,
    pub ai: AiTuning,
    pub roster: Vec<CountrySpec>,
}

impl GameConfig {
    /// Cost to reach `level`, or `None` when out of the table's range.
    pub fn upgrade_cost(&self, level: i64) -> Option<&Stockpile> {
        if level < 1 {
            return None;
        }
        self.upgrade_costs.get((level - 1) as usize)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            owner_telegram_id: 8_588_773_170,
            season_duration_days: 30,
            advisor_tip_interval_hours: 6,
            ai_action_interval_minutes: 30,
            starting_resources: Stockpile::new(1000, 500, 500, 1500),
            hourly_production: Stockpile::new(50, 30, 30, 100),
            resource_caps: Stockpile::new(1_000_000, 500_000, 500_000, 2_000_000),
            ai_production_multiplier: 1.2,
            max_army_level: 10,
            upgrade_costs: vec![
                Stockpile::new(200, 100, 50, 200),
                Stockpile::new(400, 200, 100, 300),
                Stockpile::new(800, 400, 200, 500),
                Stockpile::new(1500, 750, 400, 800),
                Stockpile::new(2500, 1250, 700, 1200),
                Stockpile::new(4000, 2000, 1200, 2000),
                Stockpile::new(6000, 3000, 2000, 3000),
                Stockpile::new(9000, 4500, 3000, 4500),
                Stockpile::new(13000, 6500, 4500, 6500),
                Stockpile::new(20000, 10000, 7000, 10000),
            ],
            ai: AiTuning::default(),
            roster: vec![
                CountrySpec::new("Persia", UniqueBonus::CavalrySpeed, "+20% army movement speed"),
                CountrySpec::new("Rome", UniqueBonus::FortressDefense, "+25% city defense"),
                CountrySpec::new("Egypt", UniqueBonus::NileBounty, "+15% food production"),
                CountrySpec::new("China", UniqueBonus::GreatWall, "+30% border defense"),
                CountrySpec::new("Greece", UniqueBonus::Phalanx, "+20% infantry attack"),
                CountrySpec::new(
                    "Babylon",
                    UniqueBonus::HangingGardens,
                    "+15% resource production",
                ),
                CountrySpec::new("Assyria", UniqueBonus::SiegeMasters, "+25% siege attack"),
                CountrySpec::new("Carthage", UniqueBonus::NavalSupremacy, "+30% naval units"),
                CountrySpec::new("India", UniqueBonus::ElephantWarfare, "+20% heavy unit damage"),
                CountrySpec::new(
                    "Macedonia",
                    UniqueBonus::CompanionCavalry,
                    "+25% cavalry charge",
                ),
                CountrySpec::new("Hittites", UniqueBonus::IronMasters, "+20% iron production"),
                CountrySpec::new("Phoenicia", UniqueBonus::TradeNetwork, "+25% gold income"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_table_covers_levels_one_through_max() {
        let config = GameConfig::default();
        for level in 1..=config.max_army_level {
            assert!(config.upgrade_cost(level).is_some(), "level {level}");
        }
        assert!(config.upgrade_cost(0).is_none());
        assert!(config.upgrade_cost(config.max_army_level + 1).is_none());
    }

    #[test]
    fn level_two_cost_matches_table() {
        let config = GameConfig::default();
        assert_eq!(
            config.upgrade_cost(2),
            Some(&Stockpile::new(400, 200, 100, 300))
        );
    }

    #[test]
    fn roster_has_twelve_unique_nations() {
        let config = GameConfig::default();
        assert_eq!(config.roster.len(), 12);
        let mut names: Vec<&str> = config.roster.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }
}
