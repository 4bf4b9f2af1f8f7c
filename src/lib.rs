pub mod config;
pub mod db;
pub mod engine;
pub mod model;

pub use config::{AiTuning, CountrySpec, GameConfig};
pub use engine::{GameEngine, Outcome};
pub use model::{
    Alliance, Army, Country, Event, EventKind, Player, Resources, Season, Stockpile, UniqueBonus,
};
