//! Collaborator seam between combat states and the rest of a fighter
//!
//! States never own animation, movement or stamina. They call through this
//! trait on enter, update and exit.

use crate::combat::attack::{AttackType, HitSeverity};
use crate::combat::dodge::DodgeDirection;
use crate::core::types::Vec2;

/// Discrete animation triggers emitted by combat states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    Idle,
    Attack(AttackType),
    Block(bool),
    Dodge(DodgeDirection),
    HitReaction(HitSeverity),
    Knockdown,
    SpecialKnockdown,
    Stagger,
    Exhausted,
    Knockout,
}

/// Everything a combat state may touch on its fighter
pub trait CombatHooks {
    /// Fire-and-forget animation trigger
    fn play(&mut self, cue: AnimationCue);

    /// Local-frame velocity requested by the state for this tick
    fn set_velocity(&mut self, velocity: Vec2);

    /// Current stamina as a percentage in `[0, 100]`
    fn stamina_percentage(&self) -> f32;

    fn set_stamina_regen_multiplier(&mut self, multiplier: f32);
}

/// Hooks that record every call, for tests and headless tools
#[derive(Debug, Clone)]
pub struct RecordingHooks {
    pub cues: Vec<AnimationCue>,
    pub velocity: Vec2,
    pub stamina_pct: f32,
    pub regen_multiplier: f32,
}

impl Default for RecordingHooks {
    fn default() -> Self {
        Self {
            cues: Vec::new(),
            velocity: Vec2::ZERO,
            stamina_pct: 100.0,
            regen_multiplier: 1.0,
        }
    }
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stamina(stamina_pct: f32) -> Self {
        Self {
            stamina_pct,
            ..Self::default()
        }
    }

    pub fn last_cue(&self) -> Option<AnimationCue> {
        self.cues.last().copied()
    }
}

impl CombatHooks for RecordingHooks {
    fn play(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn stamina_percentage(&self) -> f32 {
        self.stamina_pct
    }

    fn set_stamina_regen_multiplier(&mut self, multiplier: f32) {
        self.regen_multiplier = multiplier;
    }
}
