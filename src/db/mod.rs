pub mod migrate;
pub mod queries;
pub mod seed;

pub use migrate::migrate;
pub use seed::seed_world;
