//! Duel driver: two fighters, their controllers, and hit resolution
//!
//! One call to [`Duel::tick`] is one simulation tick:
//! 1. Each corner gathers input (human-supplied or synthesized by its AI)
//! 2. Inputs are applied to the fighters
//! 3. Fighters turn toward each other and advance their own clocks
//! 4. Attacks reaching their hit frame are resolved against the defender
//! 5. Queued state transitions are drained into events and fed back to the AI

use serde::Serialize;

use crate::ai::context::AiContext;
use crate::ai::driver::AiDriver;
use crate::ai::machine::AiStateMachine;
use crate::ai::personality::AiPersonality;
use crate::ai::state::AiStateKind;
use crate::combat::attack::{AttackType, HitSeverity};
use crate::combat::constants::{HIT_KNOCKBACK, KNOCKDOWN_COMBO_HITS};
use crate::combat::state::{CombatState, CombatStateKind};
use crate::core::types::{Side, Tick, Vec2};
use crate::fighter::{Fighter, FighterProfile};
use crate::input::{InputCommand, InputOutcome};

/// Distance between the fighters at the start of a round
pub const START_DISTANCE: f32 = 5.0;
/// Fighters are never pushed closer than this
pub const MIN_SEPARATION: f32 = 0.8;
/// Half the side length of the square ring
pub const RING_HALF_SIZE: f32 = 6.0;

/// Who presses the buttons for a corner
pub enum Controller {
    Human,
    Ai {
        machine: AiStateMachine,
        driver: AiDriver,
    },
}

impl Controller {
    pub fn ai(personality: AiPersonality, seed: u64) -> Self {
        let mut machine = AiStateMachine::new(personality, seed);
        machine.initialize(AiStateKind::Observe);
        Controller::Ai {
            machine,
            driver: AiDriver::new(),
        }
    }
}

/// Per-fighter tallies for the outcome report
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FighterStats {
    pub hits_landed: u32,
    pub hits_blocked: u32,
    pub damage_dealt: f32,
    pub parries: u32,
    pub evades: u32,
    pub knockdowns_scored: u32,
    pub longest_combo: u32,
}

struct Corner {
    fighter: Fighter,
    controller: Controller,
    /// Set when the fighter is hit; consumed by its AI on the next tick
    took_hit: bool,
    stats: FighterStats,
}

impl Corner {
    fn new(fighter: Fighter, controller: Controller) -> Self {
        Self {
            fighter,
            controller,
            took_hit: false,
            stats: FighterStats::default(),
        }
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DuelEvent {
    StateChanged {
        tick: Tick,
        side: Side,
        from: CombatStateKind,
        to: CombatStateKind,
    },
    Hit {
        tick: Tick,
        attacker: Side,
        attack: AttackType,
        damage: f32,
        combo_hit: u32,
        sequence: Option<String>,
        counter: bool,
    },
    Blocked {
        tick: Tick,
        attacker: Side,
        attack: AttackType,
        damage: f32,
    },
    Parried {
        tick: Tick,
        attacker: Side,
        attack: AttackType,
    },
    Evaded {
        tick: Tick,
        attacker: Side,
        attack: AttackType,
    },
    Missed {
        tick: Tick,
        attacker: Side,
        attack: AttackType,
    },
    ComboBroken {
        tick: Tick,
        side: Side,
    },
    KnockedOut {
        tick: Tick,
        side: Side,
    },
}

/// End-of-fight snapshot of one fighter
#[derive(Debug, Clone, Serialize)]
pub struct FighterSummary {
    pub name: String,
    pub health: f32,
    pub health_pct: f32,
    pub stamina_pct: f32,
    pub state: CombatStateKind,
    pub stats: FighterStats,
}

impl FighterSummary {
    fn of(corner: &Corner) -> Self {
        let fighter = &corner.fighter;
        Self {
            name: fighter.name().to_string(),
            health: fighter.health().current(),
            health_pct: fighter.health().percentage(),
            stamina_pct: fighter.stamina().percentage(),
            state: fighter.kind(),
            stats: corner.stats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DuelOutcome {
    pub seed: u64,
    /// None on a draw
    pub winner: Option<Side>,
    pub knockout: bool,
    pub ticks: Tick,
    pub player: FighterSummary,
    pub opponent: FighterSummary,
}

pub struct Duel {
    player: Corner,
    opponent: Corner,
    tick: Tick,
    seed: u64,
}

fn start_positions() -> [(Vec2, Vec2); 2] {
    let half = START_DISTANCE / 2.0;
    [
        (Vec2::new(0.0, -half), Vec2::Y),
        (Vec2::new(0.0, half), -Vec2::Y),
    ]
}

impl Duel {
    /// Human player against an AI opponent
    pub fn new(
        player: FighterProfile,
        opponent: FighterProfile,
        personality: AiPersonality,
        seed: u64,
    ) -> Self {
        Self::with_controllers(
            player,
            Controller::Human,
            opponent,
            Controller::ai(personality, seed),
            seed,
        )
    }

    /// Both corners AI-driven, each with its own rng stream
    pub fn ai_vs_ai(
        player: FighterProfile,
        player_personality: AiPersonality,
        opponent: FighterProfile,
        opponent_personality: AiPersonality,
        seed: u64,
    ) -> Self {
        Self::with_controllers(
            player,
            Controller::ai(player_personality, seed),
            opponent,
            Controller::ai(opponent_personality, seed.wrapping_add(1)),
            seed,
        )
    }

    pub fn with_controllers(
        player: FighterProfile,
        player_controller: Controller,
        opponent: FighterProfile,
        opponent_controller: Controller,
        seed: u64,
    ) -> Self {
        let [(p_pos, p_facing), (o_pos, o_facing)] = start_positions();
        tracing::info!(
            player = %player.name,
            opponent = %opponent.name,
            seed,
            "duel created"
        );
        Self {
            player: Corner::new(
                Fighter::new(Side::Player, player, p_pos, p_facing),
                player_controller,
            ),
            opponent: Corner::new(
                Fighter::new(Side::Opponent, opponent, o_pos, o_facing),
                opponent_controller,
            ),
            tick: 0,
            seed,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.corner(side).fighter
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.corner_mut(side).fighter
    }

    pub fn stats(&self, side: Side) -> &FighterStats {
        &self.corner(side).stats
    }

    /// The AI machine driving `side`, if any
    pub fn ai(&self, side: Side) -> Option<&AiStateMachine> {
        match &self.corner(side).controller {
            Controller::Ai { machine, .. } => Some(machine),
            Controller::Human => None,
        }
    }

    pub fn distance(&self) -> f32 {
        self.player
            .fighter
            .position()
            .distance(self.opponent.fighter.position())
    }

    pub fn is_over(&self) -> bool {
        self.player.fighter.is_knocked_out() || self.opponent.fighter.is_knocked_out()
    }

    fn corner(&self, side: Side) -> &Corner {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn corner_mut(&mut self, side: Side) -> &mut Corner {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// (own, other) for `side`
    fn corners_mut(&mut self, side: Side) -> (&mut Corner, &mut Corner) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// Run one tick. `player_inputs`/`player_movement` are ignored when the
    /// player corner is AI-driven.
    pub fn tick(
        &mut self,
        player_inputs: &[InputCommand],
        player_movement: Vec2,
    ) -> Vec<DuelEvent> {
        self.tick_both((player_inputs, player_movement), (&[], Vec2::ZERO))
    }

    /// Run one tick with human input for both corners (hot-seat and scripted
    /// fights). Input for an AI-driven corner is ignored.
    pub fn tick_both(
        &mut self,
        player: (&[InputCommand], Vec2),
        opponent: (&[InputCommand], Vec2),
    ) -> Vec<DuelEvent> {
        let now = self.tick;
        let mut events = Vec::new();

        if self.is_over() {
            return events;
        }

        let player_move = self.apply_controls(Side::Player, player.0, player.1, &mut events);
        let opponent_move =
            self.apply_controls(Side::Opponent, opponent.0, opponent.1, &mut events);

        let to_opponent = self.opponent.fighter.position() - self.player.fighter.position();
        self.player.fighter.face(to_opponent);
        self.opponent.fighter.face(-to_opponent);

        let player_hit = self.player.fighter.tick(now, player_move);
        let opponent_hit = self.opponent.fighter.tick(now, opponent_move);

        // Hits landing on the same tick trade: both are judged from the same
        // spacing and both connect, so a double knockout is a draw.
        let spacing = self.distance();
        let mut struck = Vec::new();
        for (side, hit) in [(Side::Player, player_hit), (Side::Opponent, opponent_hit)] {
            if let Some(attack) = hit {
                if self.resolve_hit(side, attack, spacing, &mut events) {
                    struck.push(side.other());
                }
            }
        }
        for side in struck {
            self.fighter_mut(side).combo_mut().reset();
        }

        self.keep_apart();
        self.collect_transitions(&mut events);

        self.tick += 1;
        events
    }

    /// Gather and apply this tick's inputs for one corner; returns movement
    fn apply_controls(
        &mut self,
        side: Side,
        human_inputs: &[InputCommand],
        human_movement: Vec2,
        events: &mut Vec<DuelEvent>,
    ) -> Vec2 {
        let now = self.tick;
        let (own, other) = self.corners_mut(side);

        let (inputs, movement) = match &mut own.controller {
            Controller::Human => (human_inputs.to_vec(), human_movement),
            Controller::Ai { machine, driver } => {
                let ctx = AiContext::new(
                    own.fighter.position(),
                    other.fighter.position(),
                    own.fighter.health().percentage(),
                    other.fighter.health().percentage(),
                    other.fighter.is_in(CombatStateKind::Attacking),
                )
                .with_hit(own.took_hit);
                own.took_hit = false;
                machine.update(ctx);
                let command = driver.command(machine.current(), machine.context());
                (command.inputs, command.movement)
            }
        };

        for input in inputs {
            let outcome = own.fighter.handle_input(input, now);
            tracing::trace!(?side, ?input, ?outcome, "input");

            if let Controller::Ai { machine, driver } = &mut own.controller {
                match (input, outcome) {
                    (InputCommand::Attack(_), InputOutcome::Accepted) => {
                        machine.mark_attack_executed()
                    }
                    // retry the press next tick instead of holding a phantom guard
                    (InputCommand::BlockPressed, outcome) if !outcome.is_accepted() => {
                        driver.reset()
                    }
                    _ => {}
                }
            }

            if input == InputCommand::BlockPressed
                && outcome.is_accepted()
                && other.fighter.combo_mut().try_break(now)
            {
                events.push(DuelEvent::ComboBroken {
                    tick: now,
                    side: other.fighter.side(),
                });
            }
        }

        movement
    }

    /// Resolve one attack at its hit frame. Returns true on a clean hit; the
    /// defender's own combo is dropped by the caller once the tick's hits
    /// are all resolved.
    fn resolve_hit(
        &mut self,
        attacker_side: Side,
        attack: AttackType,
        distance: f32,
        events: &mut Vec<DuelEvent>,
    ) -> bool {
        let now = self.tick;
        let (atk, def) = self.corners_mut(attacker_side);
        let data = *atk.fighter.attack_data(attack);

        if def.fighter.is_knocked_out() {
            return false;
        }

        if distance > data.reach {
            events.push(DuelEvent::Missed {
                tick: now,
                attacker: attacker_side,
                attack,
            });
            return false;
        }

        if def.fighter.is_invulnerable() {
            def.stats.evades += 1;
            events.push(DuelEvent::Evaded {
                tick: now,
                attacker: attacker_side,
                attack,
            });
            return false;
        }

        if def.fighter.is_in(CombatStateKind::Blocking) {
            if let Some(parry) = def.fighter.parry_mut().try_parry(now) {
                atk.fighter.combo_mut().reset();
                atk.fighter.react(CombatState::parry_stagger(parry.stagger_ticks));
                def.stats.parries += 1;
                events.push(DuelEvent::Parried {
                    tick: now,
                    attacker: attacker_side,
                    attack,
                });
                return false;
            }

            let chip = def.fighter.mitigate(data.damage);
            let dealt = def.fighter.apply_damage(chip);
            atk.stats.damage_dealt += dealt;
            def.stats.hits_blocked += 1;
            events.push(DuelEvent::Blocked {
                tick: now,
                attacker: attacker_side,
                attack,
                damage: dealt,
            });
            if def.fighter.health().is_depleted() {
                Self::knock_out(def, now, events);
            }
            return false;
        }

        let scored = atk.fighter.combo_mut().register_hit(attack, now);
        let counter = atk.fighter.parry_mut().take_counter_bonus(now);
        let damage = data.damage * scored.damage_multiplier() * counter;
        let dealt = def.fighter.apply_damage(damage);

        def.took_hit = true;
        atk.stats.hits_landed += 1;
        atk.stats.damage_dealt += dealt;
        atk.stats.longest_combo = atk.stats.longest_combo.max(scored.hit_number);

        let knockback = scored
            .sequence
            .as_ref()
            .map(|s| s.knockback_bonus)
            .unwrap_or(1.0);
        let push = atk.fighter.facing() * HIT_KNOCKBACK * knockback;
        def.fighter.set_position(def.fighter.position() + push);

        tracing::debug!(
            attacker = ?attacker_side,
            ?attack,
            damage = dealt,
            combo = scored.hit_number,
            sequence = scored.sequence.as_ref().map(|s| s.name.as_str()),
            "hit landed"
        );
        events.push(DuelEvent::Hit {
            tick: now,
            attacker: attacker_side,
            attack,
            damage: dealt,
            combo_hit: scored.hit_number,
            sequence: scored.sequence.as_ref().map(|s| s.name.clone()),
            counter: counter > 1.0,
        });

        if def.fighter.health().is_depleted() {
            Self::knock_out(def, now, events);
            return true;
        }

        let guaranteed_stagger = scored
            .sequence
            .as_ref()
            .map(|s| s.guaranteed_stagger)
            .unwrap_or(false);
        let enhanced_knockdown = scored
            .sequence
            .as_ref()
            .map(|s| s.enhanced_knockdown)
            .unwrap_or(false);

        let reaction = if enhanced_knockdown {
            CombatState::special_knockdown()
        } else if scored.hit_number >= KNOCKDOWN_COMBO_HITS {
            CombatState::KnockedDown
        } else if guaranteed_stagger || attack.hit_severity() == HitSeverity::Heavy {
            CombatState::HitStunned(HitSeverity::Heavy)
        } else {
            CombatState::HitStunned(HitSeverity::Light)
        };

        let grounded = reaction.kind().is_grounded();
        if def.fighter.react(reaction) && grounded {
            atk.stats.knockdowns_scored += 1;
        }
        true
    }

    fn knock_out(corner: &mut Corner, now: Tick, events: &mut Vec<DuelEvent>) {
        if corner.fighter.react(CombatState::KnockedOut) {
            tracing::info!(side = ?corner.fighter.side(), tick = now, "knockout");
            events.push(DuelEvent::KnockedOut {
                tick: now,
                side: corner.fighter.side(),
            });
        }
    }

    /// Enforce the minimum separation and keep both fighters in the ring
    fn keep_apart(&mut self) {
        for corner in [&mut self.player, &mut self.opponent] {
            let clamped = corner
                .fighter
                .position()
                .clamp(Vec2::splat(-RING_HALF_SIZE), Vec2::splat(RING_HALF_SIZE));
            corner.fighter.set_position(clamped);
        }

        let p = self.player.fighter.position();
        let o = self.opponent.fighter.position();
        let gap = o - p;
        let distance = gap.length();
        if distance >= MIN_SEPARATION {
            return;
        }
        let axis = gap.try_normalize().unwrap_or(self.player.fighter.facing());
        let midpoint = (p + o) / 2.0;
        let half = axis * (MIN_SEPARATION / 2.0);
        self.player.fighter.set_position(midpoint - half);
        self.opponent.fighter.set_position(midpoint + half);
    }

    /// Turn queued combat transitions into events; an AI whose fighter left
    /// Attacking is told its attack is over.
    fn collect_transitions(&mut self, events: &mut Vec<DuelEvent>) {
        let now = self.tick;
        for corner in [&mut self.player, &mut self.opponent] {
            let side = corner.fighter.side();
            for transition in corner.fighter.drain_transitions() {
                events.push(DuelEvent::StateChanged {
                    tick: now,
                    side,
                    from: transition.from,
                    to: transition.to,
                });
                if transition.from == CombatStateKind::Attacking {
                    if let Controller::Ai { machine, .. } = &mut corner.controller {
                        machine.notify_attack_complete();
                    }
                }
            }
            // animation playback is out of scope for the headless driver
            corner.fighter.drain_cues();
            if let Controller::Ai { machine, .. } = &mut corner.controller {
                machine.drain_transitions();
            }
        }
    }

    /// Run until a knockout or `max_ticks`, with no human input
    pub fn run(&mut self, max_ticks: Tick) -> DuelOutcome {
        while self.tick < max_ticks && !self.is_over() {
            self.tick(&[], Vec2::ZERO);
        }
        self.outcome()
    }

    /// Winner by knockout, otherwise by remaining health percentage
    pub fn outcome(&self) -> DuelOutcome {
        let p_out = self.player.fighter.is_knocked_out();
        let o_out = self.opponent.fighter.is_knocked_out();
        let winner = match (p_out, o_out) {
            (false, true) => Some(Side::Player),
            (true, false) => Some(Side::Opponent),
            (true, true) => None,
            (false, false) => {
                let p = self.player.fighter.health().percentage();
                let o = self.opponent.fighter.health().percentage();
                if p > o {
                    Some(Side::Player)
                } else if o > p {
                    Some(Side::Opponent)
                } else {
                    None
                }
            }
        };

        DuelOutcome {
            seed: self.seed,
            winner,
            knockout: p_out || o_out,
            ticks: self.tick,
            player: FighterSummary::of(&self.player),
            opponent: FighterSummary::of(&self.opponent),
        }
    }

    /// New round: fighters back to their marks with full resources
    pub fn reset_round(&mut self) {
        let [(p_pos, p_facing), (o_pos, o_facing)] = start_positions();
        for (corner, (pos, facing)) in [
            (&mut self.player, (p_pos, p_facing)),
            (&mut self.opponent, (o_pos, o_facing)),
        ] {
            corner.fighter.reset_round(pos, facing);
            corner.took_hit = false;
            corner.stats = FighterStats::default();
            if let Controller::Ai { machine, driver } = &mut corner.controller {
                machine.reset();
                driver.reset();
            }
        }
        self.tick = 0;
        tracing::info!("round reset");
    }
}
