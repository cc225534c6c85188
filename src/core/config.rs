//! Simulation timing base
//!
//! Every timer in the crate counts discrete ticks at a fixed rate. Values
//! authored in seconds are converted once, at load time, with
//! [`seconds_to_ticks`], so no state ever accumulates wall-clock time.


/// Simulation ticks per second
pub const TICK_RATE: u32 = 60;

/// Duration of one tick in seconds
pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE as f32;

/// Convert a duration in seconds to whole ticks (rounded, never negative)
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * TICK_RATE as f32).round() as u32
}
