//! The AI's per-tick view of the fight
//!
//! Rebuilt from scratch every tick by the driver. The machine stamps the
//! ticks-in-state counter before handing it to the active state.

use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiContext {
    pub own_position: Vec2,
    pub opponent_position: Vec2,
    pub distance: f32,
    /// Percent, 0-100
    pub own_health_pct: f32,
    /// Percent, 0-100
    pub opponent_health_pct: f32,
    pub opponent_attacking: bool,
    /// The AI fighter took a hit this tick
    pub took_hit: bool,
    pub ticks_since_state_change: u32,
}

impl Default for AiContext {
    fn default() -> Self {
        Self {
            own_position: Vec2::ZERO,
            opponent_position: Vec2::ZERO,
            distance: 0.0,
            own_health_pct: 100.0,
            opponent_health_pct: 100.0,
            opponent_attacking: false,
            took_hit: false,
            ticks_since_state_change: 0,
        }
    }
}

impl AiContext {
    pub fn new(
        own_position: Vec2,
        opponent_position: Vec2,
        own_health_pct: f32,
        opponent_health_pct: f32,
        opponent_attacking: bool,
    ) -> Self {
        Self {
            own_position,
            opponent_position,
            distance: own_position.distance(opponent_position),
            own_health_pct,
            opponent_health_pct,
            opponent_attacking,
            took_hit: false,
            ticks_since_state_change: 0,
        }
    }

    /// Snapshot with only distance set (tests and tools)
    pub fn at_distance(distance: f32) -> Self {
        Self {
            opponent_position: Vec2::new(0.0, distance),
            distance,
            ..Self::default()
        }
    }

    pub fn with_health(mut self, own_health_pct: f32) -> Self {
        self.own_health_pct = own_health_pct;
        self
    }

    pub fn with_opponent_attacking(mut self, attacking: bool) -> Self {
        self.opponent_attacking = attacking;
        self
    }

    pub fn with_hit(mut self, took_hit: bool) -> Self {
        self.took_hit = took_hit;
        self
    }

    /// Unit vector from this fighter toward the opponent
    pub fn toward_opponent(&self) -> Vec2 {
        (self.opponent_position - self.own_position).normalize_or_zero()
    }
}
