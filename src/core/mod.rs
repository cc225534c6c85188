pub mod config;
pub mod error;
pub mod types;

pub use config::{seconds_to_ticks, TICK_RATE, TICK_SECONDS};
pub use types::{Side, Tick, Vec2};
