//! Combo chaining with decaying damage
//!
//! Each landed hit inside the previous attack's chain window extends the
//! combo. The hit number selects a damage multiplier from the scaling
//! array; past the end of the array the last value is reused.
//!
//! Predefined sequences reward an exact ordered string of attack types
//! landed within the tighter sequence window. Their bonus multiplies the
//! already-scaled damage. When several sequences end on the same hit the
//! longest one wins.

use serde::{Deserialize, Serialize};

use crate::combat::attack::AttackType;
use crate::combat::constants::{
    COMBO_BREAK_WINDOW, COMBO_SEQUENCE_WINDOW, COMBO_TIMEOUT, DEFAULT_DAMAGE_SCALING,
    MAX_DAMAGE_SCALING, MAX_SEQUENCE_BONUS, MIN_DAMAGE_SCALING, MIN_SEQUENCE_BONUS,
};
use crate::core::error::ConfigError;
use crate::core::types::Tick;

/// Chain windows, timeouts and damage scaling (ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboChainData {
    pub jab_window: u32,
    pub hook_window: u32,
    pub uppercut_window: u32,
    /// Maximum ticks since the last landed hit before the combo drops
    pub combo_timeout: u32,
    /// Ticks after a landed hit in which the defender's block breaks the combo
    pub combo_break_window: u32,
    /// Maximum gap between hits of a predefined sequence
    pub sequence_window: u32,
    pub damage_scaling: Vec<f32>,
}

impl Default for ComboChainData {
    fn default() -> Self {
        Self {
            jab_window: 24,
            hook_window: 30,
            uppercut_window: 34,
            combo_timeout: COMBO_TIMEOUT,
            combo_break_window: COMBO_BREAK_WINDOW,
            sequence_window: COMBO_SEQUENCE_WINDOW,
            damage_scaling: DEFAULT_DAMAGE_SCALING.to_vec(),
        }
    }
}

impl ComboChainData {
    /// Clamp windows to at least one tick and force the scaling array into
    /// `[0.1, 1.0]`, non-increasing.
    pub fn sanitized(mut self) -> Self {
        for window in [
            &mut self.jab_window,
            &mut self.hook_window,
            &mut self.uppercut_window,
            &mut self.combo_timeout,
            &mut self.combo_break_window,
            &mut self.sequence_window,
        ] {
            *window = (*window).max(1);
        }

        if self.damage_scaling.is_empty() {
            self.damage_scaling.push(MAX_DAMAGE_SCALING);
        }
        let mut ceiling = MAX_DAMAGE_SCALING;
        for value in self.damage_scaling.iter_mut() {
            let clamped = if value.is_nan() {
                MIN_DAMAGE_SCALING
            } else {
                value.clamp(MIN_DAMAGE_SCALING, MAX_DAMAGE_SCALING)
            };
            *value = clamped.min(ceiling);
            ceiling = *value;
        }
        self
    }

    pub fn chain_window(&self, attack: AttackType) -> u32 {
        match attack {
            AttackType::Jab => self.jab_window,
            AttackType::Hook => self.hook_window,
            AttackType::Uppercut => self.uppercut_window,
        }
    }

    /// Multiplier for the n-th hit of a combo (1-indexed)
    pub fn damage_multiplier(&self, hit_number: i64) -> f32 {
        if hit_number <= 0 {
            tracing::warn!(hit_number, "combo hit number must be >= 1, using 1.0");
            return 1.0;
        }
        let Some(last) = self.damage_scaling.len().checked_sub(1) else {
            return 1.0;
        };
        let index = ((hit_number - 1) as usize).min(last);
        self.damage_scaling[index]
    }
}

/// A predefined ordered attack string with a bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboSequenceData {
    pub name: String,
    pub sequence: Vec<AttackType>,
    #[serde(default = "default_bonus")]
    pub damage_bonus: f32,
    #[serde(default = "default_bonus")]
    pub knockback_bonus: f32,
    #[serde(default)]
    pub guaranteed_stagger: bool,
    #[serde(default)]
    pub enhanced_knockdown: bool,
}

fn default_bonus() -> f32 {
    MIN_SEQUENCE_BONUS
}

impl ComboSequenceData {
    /// Build from raw attack-type indices
    pub fn from_indices(
        name: impl Into<String>,
        indices: &[usize],
        damage_bonus: f32,
    ) -> Result<Self, ConfigError> {
        let sequence = indices
            .iter()
            .map(|&i| {
                AttackType::from_index(i).ok_or_else(|| {
                    ConfigError::invalid("ComboSequenceData", format!("unknown attack index {}", i))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self {
            name: name.into(),
            sequence,
            damage_bonus,
            knockback_bonus: MIN_SEQUENCE_BONUS,
            guaranteed_stagger: false,
            enhanced_knockdown: false,
        }
        .validated()
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.sequence.len() < 2 {
            return Err(ConfigError::invalid(
                "ComboSequenceData",
                format!("sequence '{}' needs at least 2 attacks", self.name),
            ));
        }
        self.damage_bonus = clamp_bonus(self.damage_bonus);
        self.knockback_bonus = clamp_bonus(self.knockback_bonus);
        Ok(self)
    }
}

fn clamp_bonus(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_SEQUENCE_BONUS;
    }
    value.clamp(MIN_SEQUENCE_BONUS, MAX_SEQUENCE_BONUS)
}

/// Bonus granted by a completed sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceBonus {
    pub name: String,
    pub damage_bonus: f32,
    pub knockback_bonus: f32,
    pub guaranteed_stagger: bool,
    pub enhanced_knockdown: bool,
}

/// Scoring for one landed hit
#[derive(Debug, Clone, PartialEq)]
pub struct ComboHit {
    pub hit_number: u32,
    pub scaling: f32,
    pub sequence: Option<SequenceBonus>,
}

impl ComboHit {
    /// Standard scaling first, sequence bonus after
    pub fn damage_multiplier(&self) -> f32 {
        let bonus = self.sequence.as_ref().map(|s| s.damage_bonus).unwrap_or(1.0);
        self.scaling * bonus
    }
}

/// Per-fighter combo state
#[derive(Debug, Clone)]
pub struct ComboTracker {
    chain: ComboChainData,
    sequences: Vec<ComboSequenceData>,
    hit_count: u32,
    last_hit: Option<(AttackType, Tick)>,
    history: Vec<(AttackType, Tick)>,
}

impl ComboTracker {
    pub fn new(chain: ComboChainData, sequences: Vec<ComboSequenceData>) -> Self {
        Self {
            chain,
            sequences,
            hit_count: 0,
            last_hit: None,
            history: Vec::new(),
        }
    }

    pub fn chain(&self) -> &ComboChainData {
        &self.chain
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Does a hit at `now` still continue the current combo?
    pub fn is_chain_open(&self, now: Tick) -> bool {
        match self.last_hit {
            Some((attack, at)) if now >= at => {
                let gap = now - at;
                gap <= self.chain.chain_window(attack) as Tick
                    && gap <= self.chain.combo_timeout as Tick
            }
            _ => false,
        }
    }

    /// Record a landed hit and score it
    pub fn register_hit(&mut self, attack: AttackType, now: Tick) -> ComboHit {
        if self.hit_count > 0 && !self.is_chain_open(now) {
            tracing::debug!(hits = self.hit_count, "combo dropped before next hit");
            self.reset();
        }

        self.hit_count += 1;
        self.last_hit = Some((attack, now));
        self.history.push((attack, now));

        let longest = self
            .sequences
            .iter()
            .map(|s| s.sequence.len())
            .max()
            .unwrap_or(0);
        if self.history.len() > longest.max(1) {
            let excess = self.history.len() - longest.max(1);
            self.history.drain(..excess);
        }

        ComboHit {
            hit_number: self.hit_count,
            scaling: self.chain.damage_multiplier(self.hit_count as i64),
            sequence: self.match_sequence(),
        }
    }

    /// Longest configured sequence ending on the latest hit
    fn match_sequence(&self) -> Option<SequenceBonus> {
        let window = self.chain.sequence_window as Tick;
        let mut candidates: Vec<&ComboSequenceData> = self.sequences.iter().collect();
        candidates.sort_by(|a, b| b.sequence.len().cmp(&a.sequence.len()));
        candidates.into_iter().find_map(|seq| {
            let n = seq.sequence.len();
            if n > self.history.len() {
                return None;
            }
            let tail = &self.history[self.history.len() - n..];
            let kinds_match = tail.iter().zip(&seq.sequence).all(|((a, _), b)| a == b);
            let timing_ok = tail.windows(2).all(|w| w[1].1 - w[0].1 <= window);
            (kinds_match && timing_ok).then(|| SequenceBonus {
                name: seq.name.clone(),
                damage_bonus: seq.damage_bonus,
                knockback_bonus: seq.knockback_bonus,
                guaranteed_stagger: seq.guaranteed_stagger,
                enhanced_knockdown: seq.enhanced_knockdown,
            })
        })
    }

    /// Drop a combo whose window has lapsed
    pub fn update(&mut self, now: Tick) {
        if self.hit_count > 0 && !self.is_chain_open(now) {
            tracing::debug!(hits = self.hit_count, "combo window expired");
            self.reset();
        }
    }

    /// Defender blocked at `block_tick`; breaks the combo if timely
    pub fn try_break(&mut self, block_tick: Tick) -> bool {
        let Some((_, at)) = self.last_hit else {
            return false;
        };
        if self.hit_count == 0 || block_tick < at {
            return false;
        }
        if block_tick - at <= self.chain.combo_break_window as Tick {
            tracing::debug!(hits = self.hit_count, "combo broken by block");
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.hit_count = 0;
        self.last_hit = None;
        self.history.clear();
    }
}
