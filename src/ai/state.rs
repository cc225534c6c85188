//! Self-directed AI decision states
//!
//! Each state looks at the current [`AiContext`] and returns the kind of
//! state it wants next, or `None` to stay. The machine validates and
//! performs the move.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::context::AiContext;
use crate::ai::personality::AiPersonality;
use crate::combat::attack::AttackType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiStateKind {
    Observe,
    Approach,
    Retreat,
    Attack,
    Defend,
}

impl AiStateKind {
    pub const ALL: [AiStateKind; 5] = [
        AiStateKind::Observe,
        AiStateKind::Approach,
        AiStateKind::Retreat,
        AiStateKind::Attack,
        AiStateKind::Defend,
    ];

    /// Allowed follow-ups; never the same kind
    pub fn can_transition_to(self, to: AiStateKind) -> bool {
        use AiStateKind::*;
        if self == to {
            return false;
        }
        match self {
            Observe | Approach | Retreat => true,
            Attack => matches!(to, Observe | Defend | Retreat),
            Defend => matches!(to, Observe | Retreat | Attack),
        }
    }
}

/// Attack state data: the attack picked on entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackPlan {
    pub chosen: Option<AttackType>,
    pub executed: bool,
}

/// Defend state data: how long to hold the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefendHold {
    pub hold_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Observe,
    Approach,
    Retreat,
    Attack(AttackPlan),
    Defend(DefendHold),
}

impl AiState {
    /// A state as it is before `enter`
    pub fn fresh(kind: AiStateKind) -> Self {
        match kind {
            AiStateKind::Observe => AiState::Observe,
            AiStateKind::Approach => AiState::Approach,
            AiStateKind::Retreat => AiState::Retreat,
            AiStateKind::Attack => AiState::Attack(AttackPlan::default()),
            AiStateKind::Defend => AiState::Defend(DefendHold::default()),
        }
    }

    pub fn kind(&self) -> AiStateKind {
        match self {
            AiState::Observe => AiStateKind::Observe,
            AiState::Approach => AiStateKind::Approach,
            AiState::Retreat => AiStateKind::Retreat,
            AiState::Attack(_) => AiStateKind::Attack,
            AiState::Defend(_) => AiStateKind::Defend,
        }
    }

    pub fn can_transition_to(&self, to: AiStateKind) -> bool {
        self.kind().can_transition_to(to)
    }

    pub fn enter<R: Rng + ?Sized>(
        &mut self,
        ctx: &AiContext,
        personality: &AiPersonality,
        rng: &mut R,
    ) {
        match self {
            AiState::Attack(plan) => {
                let attack = choose_attack(ctx.distance, personality, rng);
                tracing::debug!(?attack, distance = ctx.distance, "ai chose attack");
                *plan = AttackPlan {
                    chosen: Some(attack),
                    executed: false,
                };
            }
            AiState::Defend(hold) => {
                let (min, max) = personality.timing.defend_tick_range();
                hold.hold_ticks = if min >= max {
                    min
                } else {
                    rng.gen_range(min..=max)
                };
            }
            AiState::Observe | AiState::Approach | AiState::Retreat => {}
        }
    }

    /// Decide the next state for this tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        ctx: &AiContext,
        personality: &AiPersonality,
        rng: &mut R,
    ) -> Option<AiStateKind> {
        match self {
            AiState::Observe => {
                let roll = rng.gen::<f32>();
                decide_observe(ctx, personality, roll)
            }
            AiState::Approach => decide_approach(ctx, personality),
            AiState::Retreat => decide_retreat(ctx, personality),
            AiState::Attack(plan) => {
                if ctx.took_hit && !plan.executed {
                    Some(AiStateKind::Defend)
                } else {
                    None
                }
            }
            AiState::Defend(hold) => {
                if ctx.ticks_since_state_change >= hold.hold_ticks {
                    Some(decide_after_defend(ctx, personality))
                } else {
                    None
                }
            }
        }
    }

    pub fn exit(&mut self) {}
}

/// Observe priority list; `roll` is a uniform draw in [0, 1)
pub fn decide_observe(
    ctx: &AiContext,
    personality: &AiPersonality,
    roll: f32,
) -> Option<AiStateKind> {
    let r = &personality.ranges;
    let d = ctx.distance;

    if ctx.opponent_attacking && d < r.defend_trigger {
        Some(AiStateKind::Defend)
    } else if d < r.too_close {
        Some(AiStateKind::Retreat)
    } else if ctx.own_health_pct < personality.health.cautious_below {
        Some(AiStateKind::Retreat)
    } else if d > r.approach_beyond {
        Some(AiStateKind::Approach)
    } else if (r.attack_band_min..=r.attack_band_max).contains(&d)
        && !ctx.opponent_attacking
        && roll < personality.behavior.observe_attack_chance
    {
        Some(AiStateKind::Attack)
    } else {
        None
    }
}

pub fn decide_approach(ctx: &AiContext, personality: &AiPersonality) -> Option<AiStateKind> {
    let r = &personality.ranges;
    let d = ctx.distance;

    if ctx.opponent_attacking && d < r.defend_trigger {
        Some(AiStateKind::Defend)
    } else if (r.settle_min..=r.settle_max).contains(&d) {
        Some(AiStateKind::Observe)
    } else if d < r.approach_attack_below {
        Some(AiStateKind::Attack)
    } else {
        None
    }
}

pub fn decide_retreat(ctx: &AiContext, personality: &AiPersonality) -> Option<AiStateKind> {
    let r = &personality.ranges;
    let d = ctx.distance;

    if ctx.opponent_attacking && d < r.retreat_defend_trigger {
        Some(AiStateKind::Defend)
    } else if d > r.retreat_safe_distance {
        if ctx.own_health_pct < personality.health.critical_below {
            Some(AiStateKind::Defend)
        } else {
            Some(AiStateKind::Observe)
        }
    } else {
        None
    }
}

/// Where to go once the guard has been held long enough
pub fn decide_after_defend(ctx: &AiContext, personality: &AiPersonality) -> AiStateKind {
    if ctx.own_health_pct < personality.health.critical_below {
        AiStateKind::Retreat
    } else if !ctx.opponent_attacking && ctx.distance < personality.ranges.counter_distance {
        AiStateKind::Attack
    } else {
        AiStateKind::Observe
    }
}

/// Pick an attack by distance band, then maybe override with a random one
pub fn choose_attack<R: Rng + ?Sized>(
    distance: f32,
    personality: &AiPersonality,
    rng: &mut R,
) -> AttackType {
    let bands = &personality.attack_bands;
    let banded = if distance <= bands.close_range {
        AttackType::Uppercut
    } else if distance <= bands.medium_range {
        if rng.gen_bool(0.5) {
            AttackType::Jab
        } else {
            AttackType::Hook
        }
    } else {
        AttackType::Jab
    };

    if rng.gen::<f32>() < personality.behavior.random_attack_chance {
        AttackType::ALL[rng.gen_range(0..AttackType::ALL.len())]
    } else {
        banded
    }
}
