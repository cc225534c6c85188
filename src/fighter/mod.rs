//! A fighter: one combat state machine plus the collaborators its states drive
//!
//! The machine and the body live in separate fields so the machine can
//! borrow the body as its hooks while the fighter still owns both. Every
//! state change goes through [`Fighter::change_state`], which also arms the
//! attack or reaction clock for the new state.

pub mod health;
pub mod profile;

pub use health::Health;
pub use profile::{load_profile, FighterProfile};

use crate::combat::attack::{AttackData, AttackType};
use crate::combat::combo::ComboTracker;
use crate::combat::constants::KNOCKDOWN_RECOVERY_TICKS;
use crate::combat::hooks::{AnimationCue, CombatHooks};
use crate::combat::machine::{CombatStateMachine, StateTransition};
use crate::combat::parry::ParryTracker;
use crate::combat::stamina::Stamina;
use crate::combat::state::{CombatState, CombatStateKind, Exhaustion};
use crate::core::config::TICK_SECONDS;
use crate::core::error::TransitionError;
use crate::core::types::{Side, Tick, Vec2};
use crate::input::{InputCommand, InputOutcome};

/// The parts of a fighter that combat states are allowed to touch
#[derive(Debug, Clone)]
pub struct FighterBody {
    stamina: Stamina,
    /// Local-frame velocity requested by the active state
    velocity: Vec2,
    cues: Vec<AnimationCue>,
}

impl FighterBody {
    pub fn new(stamina: Stamina) -> Self {
        Self {
            stamina,
            velocity: Vec2::ZERO,
            cues: Vec::new(),
        }
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn drain_cues(&mut self) -> Vec<AnimationCue> {
        std::mem::take(&mut self.cues)
    }
}

impl CombatHooks for FighterBody {
    fn play(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn stamina_percentage(&self) -> f32 {
        self.stamina.percentage()
    }

    fn set_stamina_regen_multiplier(&mut self, multiplier: f32) {
        self.stamina.set_regen_multiplier(multiplier);
    }
}

/// Animation-length timer for states that end on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionClock {
    Attack {
        attack: AttackType,
        elapsed: u32,
        active_frame: u32,
        total_frames: u32,
    },
    Recover {
        remaining: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Fighter {
    side: Side,
    profile: FighterProfile,
    machine: CombatStateMachine,
    body: FighterBody,
    health: Health,
    combo: ComboTracker,
    parry: ParryTracker,
    position: Vec2,
    /// Unit vector toward the opponent
    facing: Vec2,
    clock: Option<ActionClock>,
    dodge_ready_at: Tick,
    /// Exhaustion interrupted by a block or a hit; resumed on the next Idle
    unfinished_exhaustion: Option<Exhaustion>,
}

impl Fighter {
    pub fn new(side: Side, profile: FighterProfile, position: Vec2, facing: Vec2) -> Self {
        let mut body = FighterBody::new(Stamina::new(profile.stamina));
        let mut machine = CombatStateMachine::new();
        machine.initialize(CombatState::Idle, &mut body);

        Self {
            side,
            health: Health::new(profile.max_health),
            combo: ComboTracker::new(profile.combo.clone(), profile.sequences.clone()),
            parry: ParryTracker::new(profile.parry),
            machine,
            body,
            position,
            facing: facing.try_normalize().unwrap_or(Vec2::Y),
            clock: None,
            dodge_ready_at: 0,
            unfinished_exhaustion: None,
            profile,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &FighterProfile {
        &self.profile
    }

    pub fn state(&self) -> &CombatState {
        self.machine.current()
    }

    pub fn kind(&self) -> CombatStateKind {
        self.machine.kind()
    }

    pub fn is_in(&self, kind: CombatStateKind) -> bool {
        self.machine.is_in(kind)
    }

    pub fn can_transition_to(&self, kind: CombatStateKind) -> bool {
        self.machine.can_transition_to(kind)
    }

    pub fn is_knocked_out(&self) -> bool {
        self.machine.is_in(CombatStateKind::KnockedOut)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.machine.current().is_invulnerable()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn stamina(&self) -> &Stamina {
        self.body.stamina()
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn combo_mut(&mut self) -> &mut ComboTracker {
        &mut self.combo
    }

    pub fn parry(&self) -> &ParryTracker {
        &self.parry
    }

    pub fn parry_mut(&mut self) -> &mut ParryTracker {
        &mut self.parry
    }

    pub fn attack_data(&self, attack: AttackType) -> &AttackData {
        self.profile.attacks.get(attack)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Turn toward `direction`; a zero vector keeps the old facing
    pub fn face(&mut self, direction: Vec2) {
        if let Some(facing) = direction.try_normalize() {
            self.facing = facing;
        }
    }

    /// Validated state change that also arms the matching clock.
    ///
    /// Leaving Exhausted before recovery (to block or take a hit) does not
    /// end it: the exhaustion keeps counting and the fighter drops straight
    /// back into it the moment it would return to Idle.
    pub fn change_state(&mut self, next: CombatState) -> Result<(), TransitionError> {
        let leaving = match self.machine.current() {
            CombatState::Exhausted(exhaustion) => Some(*exhaustion),
            _ => None,
        };
        let clock = self.clock_for(&next);
        self.machine.change_state(next, &mut self.body)?;
        self.clock = clock;

        match self.kind() {
            CombatStateKind::Exhausted | CombatStateKind::KnockedOut => {
                self.unfinished_exhaustion = None;
            }
            CombatStateKind::Idle => {
                if let Some(exhaustion) = self.unfinished_exhaustion.take() {
                    self.machine
                        .change_state(CombatState::Exhausted(exhaustion), &mut self.body)?;
                }
            }
            _ => {
                if let Some(exhaustion) = leaving.filter(|e| !e.can_recover()) {
                    self.body
                        .stamina
                        .set_regen_multiplier(exhaustion.regen_multiplier);
                    self.unfinished_exhaustion = Some(exhaustion);
                }
            }
        }
        Ok(())
    }

    /// Interrupted exhaustion still waiting to be resumed
    pub fn unfinished_exhaustion(&self) -> Option<&Exhaustion> {
        self.unfinished_exhaustion.as_ref()
    }

    /// Apply an externally caused state (hit reaction, stagger, knockout).
    /// Returns false when the current state refuses it.
    pub fn react(&mut self, next: CombatState) -> bool {
        let to = next.kind();
        if !self.machine.can_transition_to(to) {
            tracing::debug!(side = ?self.side, from = ?self.kind(), ?to, "reaction ignored");
            return false;
        }
        self.change_state(next).is_ok()
    }

    pub fn drain_transitions(&mut self) -> Vec<StateTransition> {
        self.machine.drain_transitions()
    }

    pub fn drain_cues(&mut self) -> Vec<AnimationCue> {
        self.body.drain_cues()
    }

    /// Remove health, returning what was actually dealt
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        self.health.apply_damage(amount)
    }

    /// Damage left after blocking mitigation
    pub fn mitigate(&self, damage: f32) -> f32 {
        damage * (1.0 - self.profile.block_damage_reduction)
    }

    pub fn handle_input(&mut self, command: InputCommand, now: Tick) -> InputOutcome {
        match command {
            InputCommand::Attack(attack) => {
                if !self.machine.can_transition_to(CombatStateKind::Attacking) {
                    return InputOutcome::Rejected;
                }
                let cost = self.body.stamina.data().attack_cost(attack);
                if !self.body.stamina.consume(cost) {
                    return InputOutcome::NotEnoughStamina;
                }
                self.outcome(CombatState::Attacking(attack))
            }
            InputCommand::BlockPressed => {
                if !self.machine.can_transition_to(CombatStateKind::Blocking) {
                    return InputOutcome::Rejected;
                }
                let cost = self.body.stamina.data().block_cost;
                if !self.body.stamina.consume(cost) {
                    return InputOutcome::NotEnoughStamina;
                }
                self.parry.register_block_press(now);
                self.outcome(CombatState::Blocking)
            }
            InputCommand::BlockReleased => {
                if !self.machine.is_in(CombatStateKind::Blocking) {
                    return InputOutcome::Rejected;
                }
                self.outcome(CombatState::Idle)
            }
            InputCommand::Dodge(direction) => {
                if now < self.dodge_ready_at {
                    return InputOutcome::OnCooldown;
                }
                if !self.machine.can_transition_to(CombatStateKind::Dodging) {
                    return InputOutcome::Rejected;
                }
                let cost = self.body.stamina.data().dodge_cost;
                if !self.body.stamina.consume(cost) {
                    return InputOutcome::NotEnoughStamina;
                }
                let data = self.profile.dodge;
                let outcome = self.outcome(CombatState::dodging(direction, data));
                if outcome.is_accepted() {
                    let lockout = data.map(|d| d.duration + d.cooldown).unwrap_or(0);
                    self.dodge_ready_at = now + lockout as Tick;
                }
                outcome
            }
        }
    }

    fn outcome(&mut self, next: CombatState) -> InputOutcome {
        match self.change_state(next) {
            Ok(()) => InputOutcome::Accepted,
            Err(_) => InputOutcome::Rejected,
        }
    }

    /// Advance one tick. Returns the attack whose hit frame is this tick.
    ///
    /// Stamina does not regenerate mid-attack or mid-dodge, so spending the
    /// last of it on an attack always ends in Exhausted.
    pub fn tick(&mut self, now: Tick, movement: Vec2) -> Option<AttackType> {
        if !matches!(
            self.kind(),
            CombatStateKind::Attacking | CombatStateKind::Dodging
        ) {
            self.body.stamina.regenerate_tick();
        }
        if let Some(exhaustion) = self.unfinished_exhaustion.as_mut() {
            exhaustion.advance(self.body.stamina.percentage());
        }
        self.body.velocity = Vec2::ZERO;
        self.machine.update(&mut self.body);
        self.apply_movement(movement);
        self.combo.update(now);

        let hit = self.advance_clock();
        self.settle();
        hit
    }

    fn apply_movement(&mut self, movement: Vec2) {
        let velocity = match self.machine.current() {
            CombatState::Dodging(_) => self.to_world(self.body.velocity),
            CombatState::Idle | CombatState::Blocking | CombatState::Exhausted(_) => {
                movement.normalize_or_zero() * self.profile.walk_speed
            }
            _ => Vec2::ZERO,
        };
        self.position += velocity * TICK_SECONDS;
    }

    /// Local frame: +y toward the opponent, +x to the fighter's right
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        let right = Vec2::new(self.facing.y, -self.facing.x);
        right * local.x + self.facing * local.y
    }

    fn clock_for(&self, state: &CombatState) -> Option<ActionClock> {
        match state {
            CombatState::Attacking(attack) => {
                let data = self.profile.attacks.get(*attack);
                Some(ActionClock::Attack {
                    attack: *attack,
                    elapsed: 0,
                    active_frame: data.active_frame.max(1),
                    total_frames: data.total_frames.max(1),
                })
            }
            CombatState::HitStunned(severity) => Some(ActionClock::Recover {
                remaining: severity.stun_ticks(),
            }),
            CombatState::KnockedDown => Some(ActionClock::Recover {
                remaining: KNOCKDOWN_RECOVERY_TICKS,
            }),
            _ => None,
        }
    }

    fn advance_clock(&mut self) -> Option<AttackType> {
        match self.clock? {
            ActionClock::Attack {
                attack,
                elapsed,
                active_frame,
                total_frames,
            } => {
                let elapsed = elapsed + 1;
                let hit = (elapsed == active_frame).then_some(attack);
                if elapsed >= total_frames {
                    self.clock = None;
                    let next = if self.body.stamina.is_depleted() {
                        CombatState::exhausted(self.body.stamina.data())
                    } else {
                        CombatState::Idle
                    };
                    if let Err(err) = self.change_state(next) {
                        tracing::warn!(side = ?self.side, %err, "attack could not finish");
                    }
                } else {
                    self.clock = Some(ActionClock::Attack {
                        attack,
                        elapsed,
                        active_frame,
                        total_frames,
                    });
                }
                hit
            }
            ActionClock::Recover { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.clock = None;
                    if let Err(err) = self.change_state(CombatState::Idle) {
                        tracing::warn!(side = ?self.side, %err, "reaction could not finish");
                    }
                } else {
                    self.clock = Some(ActionClock::Recover { remaining });
                }
                None
            }
        }
    }

    /// Leave self-timed states once their own predicate allows it, and drop
    /// into Exhausted when an idle fighter has nothing left.
    fn settle(&mut self) {
        let self_timed = matches!(
            self.kind(),
            CombatStateKind::Dodging
                | CombatStateKind::Exhausted
                | CombatStateKind::SpecialKnockdown
                | CombatStateKind::ParryStagger
        );
        if self_timed && self.machine.can_transition_to(CombatStateKind::Idle) {
            let _ = self.change_state(CombatState::Idle);
        }

        if self.machine.is_in(CombatStateKind::Idle) && self.body.stamina.is_depleted() {
            let exhausted = CombatState::exhausted(self.body.stamina.data());
            let _ = self.change_state(exhausted);
        }
    }

    /// Between rounds: full health and stamina, Idle, trackers cleared
    pub fn reset_round(&mut self, position: Vec2, facing: Vec2) {
        self.machine.reset(&mut self.body);
        self.body.stamina.reset();
        self.body.velocity = Vec2::ZERO;
        self.body.cues.clear();
        self.health.reset();
        self.combo.reset();
        self.parry.reset();
        self.clock = None;
        self.dodge_ready_at = 0;
        self.unfinished_exhaustion = None;
        self.position = position;
        self.face(facing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::attack::HitSeverity;
    use crate::combat::dodge::DodgeDirection;

    fn fighter() -> Fighter {
        Fighter::new(Side::Player, FighterProfile::default(), Vec2::ZERO, Vec2::Y)
    }

    /// Tick until `f` returns true or the limit runs out; returns ticks used
    fn run_until(
        fighter: &mut Fighter,
        start: Tick,
        limit: u32,
        f: impl Fn(&Fighter) -> bool,
    ) -> u32 {
        for i in 0..limit {
            fighter.tick(start + i as Tick, Vec2::ZERO);
            if f(fighter) {
                return i + 1;
            }
        }
        limit
    }

    #[test]
    fn test_attack_spends_stamina_and_hits_on_active_frame() {
        let mut f = fighter();
        let before = f.stamina().current();
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Jab), 0),
            InputOutcome::Accepted
        );
        assert!(f.stamina().current() < before);

        let jab = *f.attack_data(AttackType::Jab);
        let mut hit_at = None;
        for t in 0..jab.total_frames as Tick {
            if f.tick(t, Vec2::ZERO) == Some(AttackType::Jab) {
                hit_at = Some(t);
            }
        }
        assert_eq!(hit_at, Some(jab.active_frame as Tick - 1));
        assert!(f.is_in(CombatStateKind::Idle));
    }

    #[test]
    fn test_attack_rejected_while_attacking() {
        let mut f = fighter();
        f.handle_input(InputCommand::Attack(AttackType::Hook), 0);
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Jab), 1),
            InputOutcome::Rejected
        );
    }

    #[test]
    fn test_not_enough_stamina_keeps_pool() {
        let mut f = fighter();
        f.body.stamina.set_current(2.0);
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Uppercut), 0),
            InputOutcome::NotEnoughStamina
        );
        assert_eq!(f.stamina().current(), 2.0);
        assert!(f.is_in(CombatStateKind::Idle));
    }

    #[test]
    fn test_block_press_and_release() {
        let mut f = fighter();
        assert!(f.handle_input(InputCommand::BlockPressed, 10).is_accepted());
        assert!(f.is_in(CombatStateKind::Blocking));
        assert!(f.parry().in_parry_window(12));
        assert!(f.handle_input(InputCommand::BlockReleased, 20).is_accepted());
        assert!(f.is_in(CombatStateKind::Idle));
        assert_eq!(
            f.handle_input(InputCommand::BlockReleased, 21),
            InputOutcome::Rejected
        );
    }

    #[test]
    fn test_dodge_moves_sideways_and_goes_on_cooldown() {
        let mut f = fighter();
        assert!(f.handle_input(InputCommand::Dodge(DodgeDirection::Right), 0).is_accepted());
        let used = run_until(&mut f, 0, 100, |f| f.is_in(CombatStateKind::Idle));
        let dodge = f.profile().dodge.unwrap_or_default();
        assert!(used <= dodge.duration + 1);
        assert!((f.position().x - dodge.distance).abs() < 0.05);
        assert!(f.position().y.abs() < 1e-4);

        assert_eq!(
            f.handle_input(InputCommand::Dodge(DodgeDirection::Left), used as Tick),
            InputOutcome::OnCooldown
        );
        let ready = (dodge.duration + dodge.cooldown) as Tick;
        assert!(f.handle_input(InputCommand::Dodge(DodgeDirection::Left), ready).is_accepted());
    }

    #[test]
    fn test_dodge_direction_follows_facing() {
        let mut f = Fighter::new(Side::Opponent, FighterProfile::default(), Vec2::ZERO, -Vec2::Y);
        f.handle_input(InputCommand::Dodge(DodgeDirection::Back), 0);
        run_until(&mut f, 0, 100, |f| f.is_in(CombatStateKind::Idle));
        // facing -y, so backing off moves toward +y
        assert!(f.position().y > 2.0);
    }

    #[test]
    fn test_dodge_without_data_ends_immediately() {
        let profile = FighterProfile {
            dodge: None,
            ..FighterProfile::default()
        };
        let mut f = Fighter::new(Side::Player, profile, Vec2::ZERO, Vec2::Y);
        assert!(f.handle_input(InputCommand::Dodge(DodgeDirection::Left), 0).is_accepted());
        assert!(!f.is_invulnerable());
        f.tick(0, Vec2::ZERO);
        assert!(f.is_in(CombatStateKind::Idle));
        assert_eq!(f.position(), Vec2::ZERO);
    }

    #[test]
    fn test_draining_stamina_exhausts_after_attack() {
        let mut f = fighter();
        let cost = f.stamina().data().jab_cost;
        f.body.stamina.set_current(cost);
        assert!(f.handle_input(InputCommand::Attack(AttackType::Jab), 0).is_accepted());
        assert!(f.stamina().is_depleted());
        let jab = *f.attack_data(AttackType::Jab);
        for t in 0..jab.total_frames as Tick {
            f.tick(t, Vec2::ZERO);
        }
        assert!(f.is_in(CombatStateKind::Exhausted));
        assert_eq!(f.stamina().regen_multiplier(), f.stamina().data().exhausted_regen_multiplier);
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Jab), 20),
            InputOutcome::Rejected
        );
    }

    #[test]
    fn test_exhaustion_recovers_with_time_and_stamina() {
        let mut f = fighter();
        f.body.stamina.set_current(0.0);
        let exhausted = CombatState::exhausted(f.stamina().data());
        f.change_state(exhausted).unwrap();
        let used = run_until(&mut f, 1, 2_000, |f| f.is_in(CombatStateKind::Idle));
        assert!(used >= f.stamina().data().exhaustion_min_ticks());
        assert!(f.stamina().percentage() >= f.stamina().data().exhaustion_recovery_threshold);
        assert_eq!(f.stamina().regen_multiplier(), 1.0);
    }

    fn exhausted_fighter() -> Fighter {
        let mut f = fighter();
        f.body.stamina.set_current(0.0);
        let exhausted = CombatState::exhausted(f.stamina().data());
        f.change_state(exhausted).unwrap();
        f
    }

    #[test]
    fn test_block_release_resumes_exhaustion() {
        let mut f = exhausted_fighter();
        f.tick(1, Vec2::ZERO);
        f.tick(2, Vec2::ZERO);

        assert!(f.handle_input(InputCommand::BlockPressed, 3).is_accepted());
        assert!(f.is_in(CombatStateKind::Blocking));
        assert_eq!(f.unfinished_exhaustion().map(|e| e.elapsed()), Some(2));
        let tired = f.stamina().data().exhausted_regen_multiplier;
        assert_eq!(f.stamina().regen_multiplier(), tired);
        f.tick(3, Vec2::ZERO);

        assert!(f.handle_input(InputCommand::BlockReleased, 4).is_accepted());
        assert!(f.is_in(CombatStateKind::Exhausted));
        assert!(f.unfinished_exhaustion().is_none());
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Jab), 4),
            InputOutcome::Rejected
        );

        // plenty of stamina: only the minimum duration still holds it
        f.body.stamina.set_current(60.0);
        let min = f.stamina().data().exhaustion_min_ticks();
        let used = run_until(&mut f, 4, 2_000, |f| f.is_in(CombatStateKind::Idle));
        assert_eq!(3 + used, min);
        assert_eq!(f.stamina().regen_multiplier(), 1.0);
        assert!(f.handle_input(InputCommand::Attack(AttackType::Jab), 200).is_accepted());
    }

    #[test]
    fn test_hit_stun_resumes_exhaustion() {
        let mut f = exhausted_fighter();
        f.tick(1, Vec2::ZERO);

        assert!(f.react(CombatState::HitStunned(HitSeverity::Light)));
        assert!(f.unfinished_exhaustion().is_some());
        let stun = run_until(&mut f, 2, 100, |f| !f.is_in(CombatStateKind::HitStunned));
        assert_eq!(stun, HitSeverity::Light.stun_ticks());
        assert!(f.is_in(CombatStateKind::Exhausted));
        assert_eq!(
            f.handle_input(InputCommand::Attack(AttackType::Jab), 20),
            InputOutcome::Rejected
        );

        // time alone is not enough: stamina must reach the threshold too
        let data = *f.stamina().data();
        let more = run_until(&mut f, 20, 2_000, |f| f.is_in(CombatStateKind::Idle));
        assert!(1 + stun + more > data.exhaustion_min_ticks());
        assert!(f.stamina().percentage() >= data.exhaustion_recovery_threshold);
    }

    #[test]
    fn test_recovered_exhaustion_is_not_resumed() {
        let mut f = exhausted_fighter();
        f.body.stamina.set_current(60.0);
        run_until(&mut f, 1, 2_000, |f| f.is_in(CombatStateKind::Idle));

        assert!(f.handle_input(InputCommand::BlockPressed, 500).is_accepted());
        assert!(f.handle_input(InputCommand::BlockReleased, 501).is_accepted());
        assert!(f.is_in(CombatStateKind::Idle));
        assert!(f.unfinished_exhaustion().is_none());
    }

    #[test]
    fn test_hit_stun_clock_returns_to_idle() {
        let mut f = fighter();
        assert!(f.react(CombatState::HitStunned(HitSeverity::Light)));
        let used = run_until(&mut f, 0, 100, |f| f.is_in(CombatStateKind::Idle));
        assert_eq!(used, HitSeverity::Light.stun_ticks());
    }

    #[test]
    fn test_special_knockdown_outlasts_knockdown() {
        let mut down = fighter();
        down.react(CombatState::KnockedDown);
        let normal = run_until(&mut down, 0, 500, |f| f.is_in(CombatStateKind::Idle));

        let mut special = fighter();
        special.react(CombatState::special_knockdown());
        let long = run_until(&mut special, 0, 500, |f| f.is_in(CombatStateKind::Idle));
        assert!(long > normal);
    }

    #[test]
    fn test_knockout_refuses_reactions() {
        let mut f = fighter();
        assert!(f.react(CombatState::KnockedOut));
        assert!(!f.react(CombatState::HitStunned(HitSeverity::Heavy)));
        assert_eq!(
            f.handle_input(InputCommand::BlockPressed, 5),
            InputOutcome::Rejected
        );
        assert!(f.is_knocked_out());
    }

    #[test]
    fn test_walking_only_when_free() {
        let mut f = fighter();
        f.tick(0, Vec2::Y);
        let walked = f.position().y;
        assert!(walked > 0.0);

        f.handle_input(InputCommand::Attack(AttackType::Uppercut), 1);
        f.tick(1, Vec2::Y);
        assert_eq!(f.position().y, walked);
    }

    #[test]
    fn test_reset_round_clears_everything() {
        let mut f = fighter();
        f.apply_damage(40.0);
        f.react(CombatState::KnockedOut);
        f.reset_round(Vec2::new(0.0, -2.0), Vec2::Y);
        assert!(f.is_in(CombatStateKind::Idle));
        assert_eq!(f.health().percentage(), 100.0);
        assert_eq!(f.stamina().percentage(), 100.0);
        assert_eq!(f.position(), Vec2::new(0.0, -2.0));
        assert!(f.drain_cues().is_empty());
    }
}
