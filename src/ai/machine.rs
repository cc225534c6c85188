//! AI decision state machine
//!
//! Driven once per tick with a fresh context. The active state decides its
//! own successor; the machine checks the request against the state's
//! allow-list and performs Exit -> Enter -> notify.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::ai::context::AiContext;
use crate::ai::personality::AiPersonality;
use crate::ai::state::{AiState, AiStateKind};

/// Notification queued after every accepted AI transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiTransition {
    pub from: AiStateKind,
    pub to: AiStateKind,
}

pub struct AiStateMachine {
    current: AiState,
    context: AiContext,
    ticks_in_state: u32,
    personality: AiPersonality,
    rng: ChaCha8Rng,
    transitions: Vec<AiTransition>,
}

impl AiStateMachine {
    pub fn new(personality: AiPersonality, seed: u64) -> Self {
        Self {
            current: AiState::Observe,
            context: AiContext::default(),
            ticks_in_state: 0,
            personality,
            rng: ChaCha8Rng::seed_from_u64(seed),
            transitions: Vec::new(),
        }
    }

    pub fn initialize(&mut self, initial: AiStateKind) {
        self.context = AiContext::default();
        self.ticks_in_state = 0;
        self.current = AiState::fresh(initial);
        self.current
            .enter(&self.context, &self.personality, &mut self.rng);
    }

    pub fn current(&self) -> &AiState {
        &self.current
    }

    pub fn kind(&self) -> AiStateKind {
        self.current.kind()
    }

    pub fn context(&self) -> &AiContext {
        &self.context
    }

    pub fn personality(&self) -> &AiPersonality {
        &self.personality
    }

    pub fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }

    /// Run one decision tick. Returns the new kind if the state changed.
    pub fn update(&mut self, mut context: AiContext) -> Option<AiStateKind> {
        context.ticks_since_state_change = self.ticks_in_state;
        self.context = context;

        let requested = self
            .current
            .update(&self.context, &self.personality, &mut self.rng);

        if let Some(next) = requested {
            if next != self.current.kind() && self.transition_to(next) {
                return Some(next);
            }
        }

        self.ticks_in_state = self.ticks_in_state.saturating_add(1);
        None
    }

    fn transition_to(&mut self, next: AiStateKind) -> bool {
        let from = self.current.kind();
        if !self.current.can_transition_to(next) {
            tracing::warn!(?from, to = ?next, "ai transition rejected");
            return false;
        }

        self.current.exit();
        self.current = AiState::fresh(next);
        self.current
            .enter(&self.context, &self.personality, &mut self.rng);
        self.transitions.push(AiTransition { from, to: next });
        self.ticks_in_state = 0;

        tracing::debug!(?from, to = ?next, distance = self.context.distance, "ai transition");
        true
    }

    /// The chosen attack has been turned into a button press the fighter accepted
    pub fn mark_attack_executed(&mut self) {
        if let AiState::Attack(plan) = &mut self.current {
            plan.executed = true;
        }
    }

    /// External signal: the attack animation finished
    pub fn notify_attack_complete(&mut self) -> bool {
        if self.current.kind() != AiStateKind::Attack {
            return false;
        }
        self.transition_to(AiStateKind::Observe)
    }

    pub fn drain_transitions(&mut self) -> Vec<AiTransition> {
        std::mem::take(&mut self.transitions)
    }

    /// Between rounds: back to Observe with a clean slate
    pub fn reset(&mut self) {
        self.current.exit();
        self.transitions.clear();
        self.initialize(AiStateKind::Observe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::state::AttackPlan;

    fn machine() -> AiStateMachine {
        let mut machine = AiStateMachine::new(AiPersonality::default(), 42);
        machine.initialize(AiStateKind::Observe);
        machine
    }

    #[test]
    fn test_counter_grows_while_staying() {
        let mut machine = machine();
        // 3.8 is outside every Observe trigger
        for _ in 0..5 {
            assert_eq!(machine.update(AiContext::at_distance(3.8)), None);
        }
        assert_eq!(machine.ticks_in_state(), 5);
        assert_eq!(machine.context().ticks_since_state_change, 4);
    }

    #[test]
    fn test_transition_resets_counter_and_notifies() {
        let mut machine = machine();
        machine.update(AiContext::at_distance(3.8));
        machine.update(AiContext::at_distance(3.8));
        assert_eq!(
            machine.update(AiContext::at_distance(6.0)),
            Some(AiStateKind::Approach)
        );
        assert_eq!(machine.ticks_in_state(), 0);
        assert_eq!(
            machine.drain_transitions(),
            vec![AiTransition {
                from: AiStateKind::Observe,
                to: AiStateKind::Approach
            }]
        );
    }

    #[test]
    fn test_attack_holds_until_complete_signal() {
        let mut machine = machine();
        machine.update(AiContext::at_distance(6.0));
        assert_eq!(
            machine.update(AiContext::at_distance(1.0)),
            Some(AiStateKind::Attack)
        );
        machine.mark_attack_executed();
        assert!(matches!(
            machine.current(),
            AiState::Attack(AttackPlan { executed: true, .. })
        ));

        for _ in 0..10 {
            assert_eq!(machine.update(AiContext::at_distance(1.0).with_hit(true)), None);
        }
        assert!(machine.notify_attack_complete());
        assert_eq!(machine.kind(), AiStateKind::Observe);
        assert!(!machine.notify_attack_complete());
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let run = |seed| {
            let mut machine = AiStateMachine::new(AiPersonality::default(), seed);
            machine.initialize(AiStateKind::Observe);
            (0..50)
                .map(|i| machine.update(AiContext::at_distance(2.0 + (i % 3) as f32 * 0.5)))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_reset_returns_to_observe() {
        let mut machine = machine();
        machine.update(AiContext::at_distance(6.0));
        machine.reset();
        assert_eq!(machine.kind(), AiStateKind::Observe);
        assert_eq!(machine.ticks_in_state(), 0);
        assert!(machine.drain_transitions().is_empty());
    }
}
