//! Directional evasion with partial invincibility
//!
//! A dodge runs for `duration` ticks at constant velocity. Inside the
//! i-frame range `[i_frame_start, i_frame_start + i_frame_duration)` the
//! fighter cannot be hit.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    DODGE_COOLDOWN, DODGE_DISTANCE, DODGE_DURATION, DODGE_IFRAME_DURATION, DODGE_IFRAME_START,
};
use crate::core::config::TICK_SECONDS;
use crate::core::error::ConfigError;
use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DodgeDirection {
    Left,
    Right,
    Back,
}

impl DodgeDirection {
    /// Unit vector in the fighter's local frame (+y faces the opponent)
    pub fn local_vector(self) -> Vec2 {
        match self {
            DodgeDirection::Left => Vec2::new(-1.0, 0.0),
            DodgeDirection::Right => Vec2::new(1.0, 0.0),
            DodgeDirection::Back => Vec2::new(0.0, -1.0),
        }
    }
}

/// Dodge timing contract (all values in ticks except distance)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeData {
    pub duration: u32,
    pub i_frame_start: u32,
    pub i_frame_duration: u32,
    pub cooldown: u32,
    /// World units travelled over the whole dodge at speed multiplier 1.0
    pub distance: f32,
    pub speed_multiplier: f32,
}

impl Default for DodgeData {
    fn default() -> Self {
        Self {
            duration: DODGE_DURATION,
            i_frame_start: DODGE_IFRAME_START,
            i_frame_duration: DODGE_IFRAME_DURATION,
            cooldown: DODGE_COOLDOWN,
            distance: DODGE_DISTANCE,
            speed_multiplier: 1.0,
        }
    }
}

impl DodgeData {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration < 1 {
            return Err(ConfigError::invalid("DodgeData", "duration must be >= 1"));
        }
        if self.i_frame_start > self.duration - 1 {
            return Err(ConfigError::invalid(
                "DodgeData",
                format!(
                    "i_frame_start ({}) must be <= duration - 1 ({})",
                    self.i_frame_start,
                    self.duration - 1
                ),
            ));
        }
        if self.i_frame_start + self.i_frame_duration > self.duration {
            return Err(ConfigError::invalid(
                "DodgeData",
                format!(
                    "i-frames end at {} past duration {}",
                    self.i_frame_start + self.i_frame_duration,
                    self.duration
                ),
            ));
        }
        if !(self.distance > 0.0) {
            return Err(ConfigError::invalid("DodgeData", "distance must be > 0"));
        }
        if !(self.speed_multiplier > 0.0) {
            return Err(ConfigError::invalid("DodgeData", "speed_multiplier must be > 0"));
        }
        Ok(())
    }

    pub fn is_invulnerable_at(&self, tick: u32) -> bool {
        tick >= self.i_frame_start && tick < self.i_frame_start + self.i_frame_duration
    }

    /// Constant dodge speed in world units per second
    pub fn speed(&self) -> f32 {
        self.distance / (self.duration as f32 * TICK_SECONDS) * self.speed_multiplier
    }
}

/// Transient data carried by the Dodging state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DodgeMotion {
    pub direction: DodgeDirection,
    data: Option<DodgeData>,
    tick: u32,
}

impl DodgeMotion {
    pub fn new(direction: DodgeDirection, data: Option<DodgeData>) -> Self {
        Self {
            direction,
            data,
            tick: 0,
        }
    }

    /// Start the dodge part-way through (test seam)
    pub fn with_tick(mut self, tick: u32) -> Self {
        self.tick = tick;
        self
    }

    pub fn data(&self) -> Option<&DodgeData> {
        self.data.as_ref()
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn is_invulnerable(&self) -> bool {
        self.data
            .map(|d| d.is_invulnerable_at(self.tick))
            .unwrap_or(false)
    }

    /// A dodge without timing data is over as soon as it starts
    pub fn is_dodge_complete(&self) -> bool {
        match self.data {
            Some(d) => self.tick >= d.duration,
            None => true,
        }
    }

    /// Velocity for the current tick
    pub fn velocity(&self) -> Vec2 {
        match self.data {
            Some(d) if self.tick < d.duration => self.direction.local_vector() * d.speed(),
            _ => Vec2::ZERO,
        }
    }

    /// Advance one tick, returning the velocity applied during it
    pub fn advance(&mut self) -> Vec2 {
        let velocity = self.velocity();
        if self.data.is_some() {
            self.tick = self.tick.saturating_add(1);
        }
        velocity
    }
}
