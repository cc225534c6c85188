//! Stamina pool and exhaustion contract
//!
//! Attacks, dodges and blocks spend stamina. Reaching zero is the trigger
//! for the Exhausted state, which scales regeneration down until the
//! fighter recovers.

use serde::{Deserialize, Serialize};

use crate::combat::attack::AttackType;
use crate::combat::constants::{
    EXHAUSTED_REGEN_MULTIPLIER, EXHAUSTION_MIN_DURATION_SECS, EXHAUSTION_RECOVERY_THRESHOLD,
    MAX_STAMINA, STAMINA_REGEN_PER_SECOND,
};
use crate::core::config::{seconds_to_ticks, TICK_SECONDS};
use crate::core::error::ConfigError;
use crate::core::types::percentage;

/// Stamina contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaData {
    pub max_stamina: f32,
    pub regen_per_second: f32,
    pub jab_cost: f32,
    pub hook_cost: f32,
    pub uppercut_cost: f32,
    pub dodge_cost: f32,
    pub block_cost: f32,
    /// Regen multiplier while Exhausted, restored to 1.0 on exit
    pub exhausted_regen_multiplier: f32,
    pub exhaustion_min_duration_secs: f32,
    /// Stamina percentage (0-100) needed to leave Exhausted
    pub exhaustion_recovery_threshold: f32,
}

impl Default for StaminaData {
    fn default() -> Self {
        Self {
            max_stamina: MAX_STAMINA,
            regen_per_second: STAMINA_REGEN_PER_SECOND,
            jab_cost: 8.0,
            hook_cost: 12.0,
            uppercut_cost: 18.0,
            dodge_cost: 15.0,
            block_cost: 0.0,
            exhausted_regen_multiplier: EXHAUSTED_REGEN_MULTIPLIER,
            exhaustion_min_duration_secs: EXHAUSTION_MIN_DURATION_SECS,
            exhaustion_recovery_threshold: EXHAUSTION_RECOVERY_THRESHOLD,
        }
    }
}

impl StaminaData {
    /// Reject a negative pool, clamp everything else into range
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !(self.max_stamina >= 0.0) {
            return Err(ConfigError::invalid(
                "StaminaData",
                format!("max_stamina ({}) must be >= 0", self.max_stamina),
            ));
        }
        let max = self.max_stamina;
        for cost in [
            &mut self.jab_cost,
            &mut self.hook_cost,
            &mut self.uppercut_cost,
            &mut self.dodge_cost,
            &mut self.block_cost,
        ] {
            *cost = cost.clamp(0.0, max);
        }
        self.regen_per_second = self.regen_per_second.max(0.0);
        self.exhausted_regen_multiplier = self.exhausted_regen_multiplier.clamp(0.0, 1.0);
        self.exhaustion_min_duration_secs = self.exhaustion_min_duration_secs.max(0.0);
        self.exhaustion_recovery_threshold = self.exhaustion_recovery_threshold.clamp(0.0, 100.0);
        Ok(self)
    }

    pub fn attack_cost(&self, attack: AttackType) -> f32 {
        match attack {
            AttackType::Jab => self.jab_cost,
            AttackType::Hook => self.hook_cost,
            AttackType::Uppercut => self.uppercut_cost,
        }
    }

    pub fn exhaustion_min_ticks(&self) -> u32 {
        seconds_to_ticks(self.exhaustion_min_duration_secs)
    }
}

/// Depletable stamina pool
#[derive(Debug, Clone)]
pub struct Stamina {
    data: StaminaData,
    current: f32,
    regen_multiplier: f32,
}

impl Stamina {
    pub fn new(data: StaminaData) -> Self {
        Self {
            current: data.max_stamina,
            data,
            regen_multiplier: 1.0,
        }
    }

    pub fn data(&self) -> &StaminaData {
        &self.data
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn percentage(&self) -> f32 {
        percentage(self.current, self.data.max_stamina)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn has_enough(&self, amount: f32) -> bool {
        self.current >= amount
    }

    /// Spend stamina; fails without spending if the pool is too low
    pub fn consume(&mut self, amount: f32) -> bool {
        let amount = amount.max(0.0);
        if !self.has_enough(amount) {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        true
    }

    pub fn regen_multiplier(&self) -> f32 {
        self.regen_multiplier
    }

    pub fn set_regen_multiplier(&mut self, multiplier: f32) {
        self.regen_multiplier = multiplier.max(0.0);
    }

    /// Passive regeneration for one tick
    pub fn regenerate_tick(&mut self) {
        let gain = self.data.regen_per_second * TICK_SECONDS * self.regen_multiplier;
        self.current = (self.current + gain).min(self.data.max_stamina);
    }

    /// Set the pool directly (clamped)
    pub fn set_current(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.data.max_stamina);
    }

    pub fn reset(&mut self) {
        self.current = self.data.max_stamina;
        self.regen_multiplier = 1.0;
    }
}
