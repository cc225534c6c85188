//! Combat states
//!
//! Every fighter is always in exactly one combat state. Legality of moving
//! between states is a pure function over the pair of state kinds; a few
//! entries additionally depend on the source state's own timers.

use serde::{Deserialize, Serialize};

use crate::combat::attack::{AttackType, HitSeverity};
use crate::combat::constants::SPECIAL_KNOCKDOWN_RECOVERY_TICKS;
use crate::combat::dodge::{DodgeData, DodgeDirection, DodgeMotion};
use crate::combat::hooks::{AnimationCue, CombatHooks};
use crate::combat::stamina::StaminaData;
use crate::core::types::Vec2;

/// Tag of a combat state, without its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStateKind {
    Idle,
    Attacking,
    Blocking,
    Dodging,
    Exhausted,
    HitStunned,
    KnockedDown,
    SpecialKnockdown,
    ParryStagger,
    KnockedOut,
}

impl CombatStateKind {
    pub const ALL: [CombatStateKind; 10] = [
        CombatStateKind::Idle,
        CombatStateKind::Attacking,
        CombatStateKind::Blocking,
        CombatStateKind::Dodging,
        CombatStateKind::Exhausted,
        CombatStateKind::HitStunned,
        CombatStateKind::KnockedDown,
        CombatStateKind::SpecialKnockdown,
        CombatStateKind::ParryStagger,
        CombatStateKind::KnockedOut,
    ];

    /// Is the fighter on the floor or out?
    pub fn is_grounded(self) -> bool {
        matches!(
            self,
            CombatStateKind::KnockedDown
                | CombatStateKind::SpecialKnockdown
                | CombatStateKind::KnockedOut
        )
    }
}

/// Outcome of the static transition matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    Allowed,
    /// Allowed only when the source state's own predicate holds
    Conditional,
    Rejected,
}

/// The transition-legality matrix
pub fn transition_rule(from: CombatStateKind, to: CombatStateKind) -> TransitionRule {
    use CombatStateKind::*;
    use TransitionRule::*;

    if from == KnockedOut {
        return Rejected;
    }
    if from == to {
        return Rejected;
    }
    if to == KnockedOut {
        return Allowed;
    }

    match (from, to) {
        (Idle, _) => Allowed,

        (Attacking, Idle | Exhausted | HitStunned | KnockedDown | SpecialKnockdown) => Allowed,
        // parried mid-swing
        (Attacking, ParryStagger) => Allowed,

        (Blocking, Idle | HitStunned | KnockedDown | SpecialKnockdown) => Allowed,

        (Dodging, Idle | HitStunned) => Conditional,
        (Dodging, KnockedDown | SpecialKnockdown) => Allowed,

        (Exhausted, Idle) => Conditional,
        (Exhausted, Blocking | HitStunned | KnockedDown) => Allowed,

        (HitStunned, Idle | KnockedDown) => Allowed,

        (KnockedDown, Idle) => Allowed,

        (SpecialKnockdown, Idle) => Conditional,

        (ParryStagger, Idle) => Conditional,
        (ParryStagger, HitStunned | KnockedDown | SpecialKnockdown) => Allowed,

        _ => Rejected,
    }
}

/// Exhausted state data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exhaustion {
    pub min_ticks: u32,
    /// Stamina percentage needed to recover
    pub recovery_threshold: f32,
    pub regen_multiplier: f32,
    elapsed: u32,
    stamina_pct: f32,
}

impl Exhaustion {
    pub fn new(data: &StaminaData) -> Self {
        Self {
            min_ticks: data.exhaustion_min_ticks(),
            recovery_threshold: data.exhaustion_recovery_threshold,
            regen_multiplier: data.exhausted_regen_multiplier,
            elapsed: 0,
            stamina_pct: 0.0,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Both the minimum time and the stamina threshold must hold
    pub fn can_recover(&self) -> bool {
        self.elapsed >= self.min_ticks && self.stamina_pct >= self.recovery_threshold
    }

    /// One tick of exhaustion with the current stamina percentage
    pub fn advance(&mut self, stamina_pct: f32) {
        self.elapsed = self.elapsed.saturating_add(1);
        self.stamina_pct = stamina_pct;
    }
}

/// SpecialKnockdown state data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnockdownRecovery {
    pub recovery_ticks: u32,
    elapsed: u32,
    can_get_up: bool,
}

impl KnockdownRecovery {
    pub fn new(recovery_ticks: u32) -> Self {
        Self {
            recovery_ticks,
            elapsed: 0,
            can_get_up: false,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn can_get_up(&self) -> bool {
        self.can_get_up
    }

    fn advance(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
        if self.elapsed >= self.recovery_ticks {
            self.can_get_up = true;
        }
    }
}

/// ParryStagger state data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub duration: u32,
    elapsed: u32,
}

impl Stagger {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            elapsed: 0,
        }
    }

    /// Start the stagger part-way through (test seam)
    pub fn with_elapsed(mut self, elapsed: u32) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_stagger_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A combat state with its transient data
#[derive(Debug, Clone, PartialEq)]
pub enum CombatState {
    Idle,
    Attacking(AttackType),
    Blocking,
    Dodging(DodgeMotion),
    Exhausted(Exhaustion),
    HitStunned(HitSeverity),
    KnockedDown,
    SpecialKnockdown(KnockdownRecovery),
    ParryStagger(Stagger),
    KnockedOut,
}

impl CombatState {
    pub fn dodging(direction: DodgeDirection, data: Option<DodgeData>) -> Self {
        CombatState::Dodging(DodgeMotion::new(direction, data))
    }

    pub fn exhausted(data: &StaminaData) -> Self {
        CombatState::Exhausted(Exhaustion::new(data))
    }

    pub fn special_knockdown() -> Self {
        CombatState::SpecialKnockdown(KnockdownRecovery::new(SPECIAL_KNOCKDOWN_RECOVERY_TICKS))
    }

    pub fn parry_stagger(duration: u32) -> Self {
        CombatState::ParryStagger(Stagger::new(duration))
    }

    pub fn kind(&self) -> CombatStateKind {
        match self {
            CombatState::Idle => CombatStateKind::Idle,
            CombatState::Attacking(_) => CombatStateKind::Attacking,
            CombatState::Blocking => CombatStateKind::Blocking,
            CombatState::Dodging(_) => CombatStateKind::Dodging,
            CombatState::Exhausted(_) => CombatStateKind::Exhausted,
            CombatState::HitStunned(_) => CombatStateKind::HitStunned,
            CombatState::KnockedDown => CombatStateKind::KnockedDown,
            CombatState::SpecialKnockdown(_) => CombatStateKind::SpecialKnockdown,
            CombatState::ParryStagger(_) => CombatStateKind::ParryStagger,
            CombatState::KnockedOut => CombatStateKind::KnockedOut,
        }
    }

    /// Matrix lookup plus this state's own conditions
    pub fn can_transition_to(&self, to: CombatStateKind) -> bool {
        match transition_rule(self.kind(), to) {
            TransitionRule::Allowed => true,
            TransitionRule::Rejected => false,
            TransitionRule::Conditional => match (self, to) {
                (CombatState::Dodging(motion), CombatStateKind::Idle) => {
                    motion.is_dodge_complete()
                }
                (CombatState::Dodging(motion), CombatStateKind::HitStunned) => {
                    !motion.is_invulnerable()
                }
                (CombatState::Exhausted(exhaustion), CombatStateKind::Idle) => {
                    exhaustion.can_recover()
                }
                (CombatState::SpecialKnockdown(recovery), CombatStateKind::Idle) => {
                    recovery.can_get_up()
                }
                (CombatState::ParryStagger(stagger), CombatStateKind::Idle) => {
                    stagger.is_stagger_complete()
                }
                _ => false,
            },
        }
    }

    /// Can a hit land on a fighter in this state?
    pub fn is_invulnerable(&self) -> bool {
        match self {
            CombatState::Dodging(motion) => motion.is_invulnerable(),
            CombatState::KnockedOut => true,
            _ => false,
        }
    }

    pub fn enter(&mut self, hooks: &mut dyn CombatHooks) {
        match self {
            CombatState::Idle => hooks.play(AnimationCue::Idle),
            CombatState::Attacking(attack) => hooks.play(AnimationCue::Attack(*attack)),
            CombatState::Blocking => hooks.play(AnimationCue::Block(true)),
            CombatState::Dodging(motion) => {
                if motion.data().is_none() {
                    tracing::error!(
                        direction = ?motion.direction,
                        "dodge entered without DodgeData; no movement or i-frames"
                    );
                }
                hooks.play(AnimationCue::Dodge(motion.direction));
            }
            CombatState::Exhausted(exhaustion) => {
                hooks.set_stamina_regen_multiplier(exhaustion.regen_multiplier);
                exhaustion.stamina_pct = hooks.stamina_percentage();
                hooks.play(AnimationCue::Exhausted);
            }
            CombatState::HitStunned(severity) => hooks.play(AnimationCue::HitReaction(*severity)),
            CombatState::KnockedDown => hooks.play(AnimationCue::Knockdown),
            CombatState::SpecialKnockdown(_) => hooks.play(AnimationCue::SpecialKnockdown),
            CombatState::ParryStagger(_) => hooks.play(AnimationCue::Stagger),
            CombatState::KnockedOut => hooks.play(AnimationCue::Knockout),
        }
    }

    /// Advance one tick
    pub fn update(&mut self, hooks: &mut dyn CombatHooks) {
        match self {
            CombatState::Dodging(motion) => {
                let velocity = motion.advance();
                hooks.set_velocity(velocity);
            }
            CombatState::Exhausted(exhaustion) => exhaustion.advance(hooks.stamina_percentage()),
            CombatState::SpecialKnockdown(recovery) => recovery.advance(),
            CombatState::ParryStagger(stagger) => {
                stagger.elapsed = stagger.elapsed.saturating_add(1);
            }
            CombatState::Idle
            | CombatState::Attacking(_)
            | CombatState::Blocking
            | CombatState::HitStunned(_)
            | CombatState::KnockedDown
            | CombatState::KnockedOut => {}
        }
    }

    pub fn exit(&mut self, hooks: &mut dyn CombatHooks) {
        match self {
            CombatState::Blocking => hooks.play(AnimationCue::Block(false)),
            CombatState::Dodging(_) => hooks.set_velocity(Vec2::ZERO),
            CombatState::Exhausted(_) => hooks.set_stamina_regen_multiplier(1.0),
            _ => {}
        }
    }
}
