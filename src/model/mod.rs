#[macro_use]
mod macros;

pub mod alliance;
pub mod army;
pub mod country;
pub mod event;
pub mod player;
pub mod resources;
pub mod season;

pub use alliance::Alliance;
pub use army::Army;
pub use country::{Country, UniqueBonus};
pub use event::{Event, EventKind};
pub use player::Player;
pub use resources::{Resources, Stockpile};
pub use season::Season;
