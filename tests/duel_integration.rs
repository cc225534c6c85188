//! Duel integration tests
//!
//! Scripted fights between two human-controlled corners, plus full AI runs.
//! Profiles come from `data/profiles/` so the configured sequences apply.

use arena_duel::ai::{load_personality, AiStateKind};
use arena_duel::combat::{AttackType, CombatStateKind, DodgeDirection};
use arena_duel::core::{Side, Vec2};
use arena_duel::duel::{Controller, Duel, DuelEvent, START_DISTANCE};
use arena_duel::fighter::load_profile;
use arena_duel::input::InputCommand;

fn scripted_duel() -> Duel {
    let profile = load_profile("default").expect("default profile");
    Duel::with_controllers(
        profile.clone(),
        Controller::Human,
        profile,
        Controller::Human,
        11,
    )
}

fn ai_duel(seed: u64) -> Duel {
    let profile = load_profile("default").expect("default profile");
    let personality = load_personality("default").expect("default personality");
    Duel::ai_vs_ai(
        profile.clone(),
        personality.clone(),
        profile,
        personality,
        seed,
    )
}

fn place(duel: &mut Duel, distance: f32) {
    duel.fighter_mut(Side::Player)
        .set_position(Vec2::new(0.0, -distance / 2.0));
    duel.fighter_mut(Side::Opponent)
        .set_position(Vec2::new(0.0, distance / 2.0));
}

/// Tick with the given inputs for each corner and no movement
fn step(duel: &mut Duel, player: &[InputCommand], opponent: &[InputCommand]) -> Vec<DuelEvent> {
    duel.tick_both((player, Vec2::ZERO), (opponent, Vec2::ZERO))
}

fn idle_for(duel: &mut Duel, ticks: u32) -> Vec<DuelEvent> {
    (0..ticks).flat_map(|_| step(duel, &[], &[])).collect()
}

#[test]
fn test_human_vs_ai_opponent_lands_hits() {
    let profile = load_profile("default").expect("default profile");
    let personality = load_personality("default").expect("default personality");
    let mut duel = Duel::new(profile.clone(), profile, personality, 3);

    assert!(duel.ai(Side::Player).is_none());
    assert!(duel.ai(Side::Opponent).is_some());

    for _ in 0..1200 {
        duel.tick(&[], Vec2::ZERO);
        if duel.is_over() {
            break;
        }
    }

    assert!(duel.stats(Side::Opponent).hits_landed > 0);
    assert!(duel.fighter(Side::Player).health().current() < 100.0);
}

#[test]
fn test_parry_staggers_attacker_and_arms_counter() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);

    let mut events = step(&mut duel, &[InputCommand::Attack(AttackType::Jab)], &[]);
    events.extend(step(&mut duel, &[], &[]));
    // guard goes up two ticks before the jab connects
    events.extend(step(&mut duel, &[], &[InputCommand::BlockPressed]));
    events.extend(idle_for(&mut duel, 2));

    assert!(events.contains(&DuelEvent::Parried {
        tick: 4,
        attacker: Side::Player,
        attack: AttackType::Jab,
    }));
    assert_eq!(duel.fighter(Side::Player).kind(), CombatStateKind::ParryStagger);
    assert_eq!(duel.stats(Side::Opponent).parries, 1);
    assert_eq!(duel.fighter(Side::Opponent).health().current(), 100.0);

    // riposte while the attacker is still staggered
    let mut events = step(
        &mut duel,
        &[],
        &[InputCommand::BlockReleased, InputCommand::Attack(AttackType::Hook)],
    );
    events.extend(idle_for(&mut duel, 10));

    let counter = events.iter().find_map(|e| match e {
        DuelEvent::Hit {
            attacker: Side::Opponent,
            damage,
            counter,
            ..
        } => Some((*damage, *counter)),
        _ => None,
    });
    let (damage, counter) = counter.expect("counter hook landed");
    assert!(counter);
    assert!((damage - 13.5).abs() < 1e-4);
    assert_eq!(duel.fighter(Side::Player).kind(), CombatStateKind::HitStunned);
}

#[test]
fn test_late_block_takes_chip_damage() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);

    step(&mut duel, &[], &[InputCommand::BlockPressed]);
    idle_for(&mut duel, 9);
    let mut events = step(&mut duel, &[InputCommand::Attack(AttackType::Jab)], &[]);
    events.extend(idle_for(&mut duel, 5));

    let chip = events.iter().find_map(|e| match e {
        DuelEvent::Blocked { damage, .. } => Some(*damage),
        _ => None,
    });
    assert!((chip.expect("jab blocked") - 1.25).abs() < 1e-4);
    assert!(!events.iter().any(|e| matches!(e, DuelEvent::Parried { .. })));
    assert_eq!(duel.fighter(Side::Opponent).kind(), CombatStateKind::Blocking);
    assert_eq!(duel.stats(Side::Opponent).hits_blocked, 1);
    assert!((duel.fighter(Side::Opponent).health().current() - 98.75).abs() < 1e-4);
}

#[test]
fn test_dodge_evades_incoming_jab() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);

    let mut events = step(&mut duel, &[InputCommand::Attack(AttackType::Jab)], &[]);
    events.extend(step(
        &mut duel,
        &[],
        &[InputCommand::Dodge(DodgeDirection::Back)],
    ));
    events.extend(idle_for(&mut duel, 4));

    assert!(events.contains(&DuelEvent::Evaded {
        tick: 4,
        attacker: Side::Player,
        attack: AttackType::Jab,
    }));
    assert_eq!(duel.stats(Side::Opponent).evades, 1);
    assert_eq!(duel.fighter(Side::Opponent).health().current(), 100.0);
    assert!(duel.distance() > 2.0);
}

/// Throw each attack as soon as the player is Idle again
fn chain(duel: &mut Duel, attacks: &[AttackType]) -> Vec<DuelEvent> {
    let mut queue = attacks.iter().copied();
    let mut next = queue.next();
    let mut events = Vec::new();
    for _ in 0..200 {
        let ready = duel.fighter(Side::Player).kind() == CombatStateKind::Idle;
        match next {
            Some(attack) if ready => {
                events.extend(step(duel, &[InputCommand::Attack(attack)], &[]));
                next = queue.next();
            }
            None if ready => break,
            _ => events.extend(step(duel, &[], &[])),
        }
    }
    events
}

#[test]
fn test_configured_sequences_score_and_finish() {
    let mut duel = scripted_duel();
    place(&mut duel, 1.0);

    let events = chain(
        &mut duel,
        &[AttackType::Jab, AttackType::Hook, AttackType::Uppercut],
    );

    let hits: Vec<(AttackType, u32, Option<String>, f32)> = events
        .iter()
        .filter_map(|e| match e {
            DuelEvent::Hit {
                attack,
                combo_hit,
                sequence,
                damage,
                ..
            } => Some((*attack, *combo_hit, sequence.clone(), *damage)),
            _ => None,
        })
        .collect();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].0, AttackType::Jab);
    assert_eq!(hits[0].2, None);
    assert_eq!(hits[1].1, 2);
    assert_eq!(hits[1].2.as_deref(), Some("one-two"));
    assert!((hits[1].3 - 9.0 * 0.75 * 1.25).abs() < 1e-4);
    assert_eq!(hits[2].1, 3);
    assert_eq!(hits[2].2.as_deref(), Some("finisher"));
    assert!((hits[2].3 - 14.0 * 0.5 * 1.5).abs() < 1e-4);

    assert_eq!(
        duel.fighter(Side::Opponent).kind(),
        CombatStateKind::SpecialKnockdown
    );
    let stats = duel.stats(Side::Player);
    assert_eq!(stats.hits_landed, 3);
    assert_eq!(stats.longest_combo, 3);
    assert_eq!(stats.knockdowns_scored, 1);
}

#[test]
fn test_timely_block_breaks_combo() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);

    let mut events = step(&mut duel, &[InputCommand::Attack(AttackType::Jab)], &[]);
    while duel.fighter(Side::Opponent).kind() != CombatStateKind::HitStunned {
        events.extend(step(&mut duel, &[], &[]));
    }
    assert_eq!(duel.fighter(Side::Player).combo().hit_count(), 1);

    while duel.fighter(Side::Opponent).kind() != CombatStateKind::Idle {
        events.extend(step(&mut duel, &[], &[]));
    }
    events.extend(step(&mut duel, &[], &[InputCommand::BlockPressed]));

    assert!(events
        .iter()
        .any(|e| matches!(e, DuelEvent::ComboBroken { side: Side::Player, .. })));
    assert_eq!(duel.fighter(Side::Player).combo().hit_count(), 0);
}

#[test]
fn test_knockout_decides_and_freezes_duel() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);
    duel.fighter_mut(Side::Opponent).apply_damage(97.0);

    let events = chain(&mut duel, &[AttackType::Jab]);
    assert!(events
        .iter()
        .any(|e| matches!(e, DuelEvent::KnockedOut { side: Side::Opponent, .. })));
    assert!(duel.is_over());

    let frozen_at = duel.current_tick();
    assert!(step(&mut duel, &[InputCommand::Attack(AttackType::Jab)], &[]).is_empty());
    assert_eq!(duel.current_tick(), frozen_at);

    let outcome = duel.outcome();
    assert_eq!(outcome.winner, Some(Side::Player));
    assert!(outcome.knockout);
    assert_eq!(outcome.opponent.state, CombatStateKind::KnockedOut);
}

fn jab_each_other(duel: &mut Duel) -> Vec<DuelEvent> {
    let jab = [InputCommand::Attack(AttackType::Jab)];
    let mut events = step(duel, &jab, &jab);
    events.extend(idle_for(duel, 6));
    events
}

#[test]
fn test_simultaneous_hits_trade_evenly() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);

    let events = jab_each_other(&mut duel);
    let landed: Vec<Side> = events
        .iter()
        .filter_map(|e| match e {
            DuelEvent::Hit { attacker, tick: 4, .. } => Some(*attacker),
            _ => None,
        })
        .collect();
    assert_eq!(landed, vec![Side::Player, Side::Opponent]);

    for side in [Side::Player, Side::Opponent] {
        let fighter = duel.fighter(side);
        assert!((fighter.health().current() - 95.0).abs() < 1e-4);
        assert_eq!(fighter.combo().hit_count(), 0);
        assert_eq!(fighter.kind(), CombatStateKind::HitStunned);
    }
}

#[test]
fn test_simultaneous_knockouts_draw() {
    let mut duel = scripted_duel();
    place(&mut duel, 2.0);
    duel.fighter_mut(Side::Player).apply_damage(99.0);
    duel.fighter_mut(Side::Opponent).apply_damage(99.0);

    let events = jab_each_other(&mut duel);
    let knocked_out: Vec<Side> = events
        .iter()
        .filter_map(|e| match e {
            DuelEvent::KnockedOut { side, .. } => Some(*side),
            _ => None,
        })
        .collect();
    assert_eq!(knocked_out, vec![Side::Opponent, Side::Player]);

    let outcome = duel.outcome();
    assert!(outcome.knockout);
    assert_eq!(outcome.winner, None);
}

#[test]
fn test_exhausted_fighter_cannot_block_out_of_exhaustion() {
    let mut tiring = load_profile("default").expect("default profile");
    tiring.stamina.jab_cost = 10.0;
    let fresh = load_profile("default").expect("default profile");
    let mut duel = Duel::with_controllers(tiring, Controller::Human, fresh, Controller::Human, 4);
    place(&mut duel, 4.0);

    // stay out of reach and swing until the tank is empty
    let mut ticks = 0;
    while duel.fighter(Side::Player).kind() != CombatStateKind::Exhausted {
        let jab = [InputCommand::Attack(AttackType::Jab)];
        let input: &[InputCommand] = if duel.fighter(Side::Player).kind() == CombatStateKind::Idle {
            &jab
        } else {
            &[]
        };
        step(&mut duel, input, &[]);
        ticks += 1;
        assert!(ticks < 2_000, "never exhausted");
    }

    step(&mut duel, &[InputCommand::BlockPressed], &[]);
    assert_eq!(duel.fighter(Side::Player).kind(), CombatStateKind::Blocking);
    let events = step(
        &mut duel,
        &[InputCommand::BlockReleased, InputCommand::Attack(AttackType::Jab)],
        &[],
    );

    assert_eq!(duel.fighter(Side::Player).kind(), CombatStateKind::Exhausted);
    assert!(!events.iter().any(|e| matches!(
        e,
        DuelEvent::StateChanged {
            side: Side::Player,
            to: CombatStateKind::Attacking,
            ..
        }
    )));
}

#[test]
fn test_ai_duel_is_deterministic_per_seed() {
    let first = ai_duel(21).run(60 * 30);
    let second = ai_duel(21).run(60 * 30);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    let exchanges: u32 = [&first.player.stats, &first.opponent.stats]
        .iter()
        .map(|s| s.hits_landed + s.hits_blocked + s.parries)
        .sum();
    assert!(exchanges > 0, "no exchanges in an AI duel");
    assert!(first.knockout || first.ticks == 60 * 30);
}

#[test]
fn test_reset_round_after_ai_fight() {
    let mut duel = ai_duel(5);
    duel.run(600);
    duel.reset_round();

    assert_eq!(duel.current_tick(), 0);
    assert!((duel.distance() - START_DISTANCE).abs() < 1e-4);
    for side in [Side::Player, Side::Opponent] {
        let fighter = duel.fighter(side);
        assert_eq!(fighter.health().current(), fighter.health().max());
        assert_eq!(fighter.kind(), CombatStateKind::Idle);
        assert_eq!(duel.stats(side).hits_landed, 0);
        assert_eq!(duel.ai(side).map(|ai| ai.kind()), Some(AiStateKind::Observe));
    }
}

#[test]
fn test_outcome_json_shape() {
    let mut duel = ai_duel(8);
    let outcome = duel.run(120);
    let value: serde_json::Value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(value["seed"], 8);
    assert_eq!(value["ticks"], 120);
    assert!(value["player"]["stats"]["hits_landed"].is_u64());
    assert!(value["opponent"]["health_pct"].is_number());
}
