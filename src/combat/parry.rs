//! Timed perfect-block (parry)
//!
//! A block pressed no more than `parry_window` ticks before a hit connects
//! turns the block into a parry. The attacker staggers, the defender gets a
//! counter window, and parrying goes on cooldown.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    PARRY_COOLDOWN, PARRY_COUNTER_MULTIPLIER, PARRY_COUNTER_WINDOW, PARRY_STAGGER_DURATION,
    PARRY_SUCCESS_DURATION, PARRY_WINDOW,
};
use crate::core::error::ConfigError;
use crate::core::types::Tick;

/// Parry timing contract (ticks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParryData {
    pub parry_window: u32,
    pub success_duration: u32,
    pub cooldown: u32,
    /// How long the parried attacker staggers
    pub stagger_duration: u32,
    /// How long the defender's counter bonus stays available
    pub counter_window: u32,
    pub counter_damage_multiplier: f32,
}

impl Default for ParryData {
    fn default() -> Self {
        Self {
            parry_window: PARRY_WINDOW,
            success_duration: PARRY_SUCCESS_DURATION,
            cooldown: PARRY_COOLDOWN,
            stagger_duration: PARRY_STAGGER_DURATION,
            counter_window: PARRY_COUNTER_WINDOW,
            counter_damage_multiplier: PARRY_COUNTER_MULTIPLIER,
        }
    }
}

impl ParryData {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parry_window < 1 {
            return Err(ConfigError::invalid("ParryData", "parry_window must be >= 1"));
        }
        if self.success_duration < 1 {
            return Err(ConfigError::invalid(
                "ParryData",
                "success_duration must be >= 1",
            ));
        }
        if self.counter_window == 0 || self.counter_window > self.stagger_duration {
            return Err(ConfigError::invalid(
                "ParryData",
                format!(
                    "counter_window ({}) must be in (0, stagger_duration ({})]",
                    self.counter_window, self.stagger_duration
                ),
            ));
        }
        if !(self.counter_damage_multiplier >= 1.0) {
            return Err(ConfigError::invalid(
                "ParryData",
                "counter_damage_multiplier must be >= 1.0",
            ));
        }
        Ok(())
    }
}

/// Result of a successful parry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParryOutcome {
    /// Duration of the attacker's ParryStagger
    pub stagger_ticks: u32,
    /// Ticks the defender has to land a bonus counter
    pub counter_window: u32,
}

/// Per-fighter parry bookkeeping
#[derive(Debug, Clone)]
pub struct ParryTracker {
    data: ParryData,
    last_block_press: Option<Tick>,
    cooldown_until: Tick,
    counter_until: Option<Tick>,
}

impl ParryTracker {
    pub fn new(data: ParryData) -> Self {
        Self {
            data,
            last_block_press: None,
            cooldown_until: 0,
            counter_until: None,
        }
    }

    pub fn data(&self) -> &ParryData {
        &self.data
    }

    pub fn register_block_press(&mut self, now: Tick) {
        self.last_block_press = Some(now);
    }

    pub fn is_on_cooldown(&self, now: Tick) -> bool {
        now < self.cooldown_until
    }

    /// Would a hit connecting at `hit_tick` be parried?
    pub fn in_parry_window(&self, hit_tick: Tick) -> bool {
        match self.last_block_press {
            Some(pressed) => {
                pressed <= hit_tick && hit_tick - pressed <= self.data.parry_window as Tick
            }
            None => false,
        }
    }

    /// Check a hit connecting at `hit_tick`; on success arm the counter window
    /// and start the cooldown.
    pub fn try_parry(&mut self, hit_tick: Tick) -> Option<ParryOutcome> {
        if self.is_on_cooldown(hit_tick) || !self.in_parry_window(hit_tick) {
            return None;
        }

        self.last_block_press = None;
        self.counter_until = Some(hit_tick + self.data.counter_window as Tick);
        self.cooldown_until =
            hit_tick + self.data.success_duration as Tick + self.data.cooldown as Tick;

        tracing::debug!(hit_tick, cooldown_until = self.cooldown_until, "parry");

        Some(ParryOutcome {
            stagger_ticks: self.data.stagger_duration,
            counter_window: self.data.counter_window,
        })
    }

    pub fn counter_available(&self, now: Tick) -> bool {
        self.counter_until.map(|until| now <= until).unwrap_or(false)
    }

    /// Consume the counter bonus for a hit landed at `now` (1.0 if none)
    pub fn take_counter_bonus(&mut self, now: Tick) -> f32 {
        let available = self.counter_available(now);
        self.counter_until = None;
        if available {
            self.data.counter_damage_multiplier
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.last_block_press = None;
        self.cooldown_until = 0;
        self.counter_until = None;
    }
}
