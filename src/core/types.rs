//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Simulation tick counter (simulation time unit)
pub type Tick = u64;

/// Which corner of the ring a fighter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Health or stamina expressed as a percentage in `[0, 100]`
pub fn percentage(current: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (current / max * 100.0).clamp(0.0, 100.0)
}
