//! Combat state machine
//!
//! The only entry point for changing a fighter's combat behavior. Holds one
//! active state and a queue of transition notifications the driver drains
//! once per tick.

use serde::Serialize;

use crate::combat::hooks::CombatHooks;
use crate::combat::state::{CombatState, CombatStateKind};
use crate::core::error::TransitionError;

/// Notification queued after every accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub from: CombatStateKind,
    pub to: CombatStateKind,
}

#[derive(Debug, Clone)]
pub struct CombatStateMachine {
    current: CombatState,
    transitions: Vec<StateTransition>,
}

impl Default for CombatStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatStateMachine {
    /// A machine resting in Idle; call [`initialize`](Self::initialize) to enter
    pub fn new() -> Self {
        Self {
            current: CombatState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn initialize(&mut self, initial: CombatState, hooks: &mut dyn CombatHooks) {
        self.current = initial;
        self.current.enter(hooks);
    }

    pub fn current(&self) -> &CombatState {
        &self.current
    }

    pub fn kind(&self) -> CombatStateKind {
        self.current.kind()
    }

    pub fn is_in(&self, kind: CombatStateKind) -> bool {
        self.current.kind() == kind
    }

    /// Advance the active state one tick. Never transitions.
    pub fn update(&mut self, hooks: &mut dyn CombatHooks) {
        self.current.update(hooks);
    }

    /// Pure legality query
    pub fn can_transition_to(&self, to: CombatStateKind) -> bool {
        self.current.can_transition_to(to)
    }

    /// Exit the old state, enter the new one, then queue the notification.
    /// A rejected request leaves the machine untouched.
    pub fn change_state(
        &mut self,
        next: CombatState,
        hooks: &mut dyn CombatHooks,
    ) -> Result<(), TransitionError> {
        let from = self.current.kind();
        let to = next.kind();

        if !self.current.can_transition_to(to) {
            tracing::warn!(?from, ?to, "combat transition rejected");
            return Err(if from == CombatStateKind::KnockedOut {
                TransitionError::Terminal { to }
            } else {
                TransitionError::Rejected { from, to }
            });
        }

        self.current.exit(hooks);
        self.current = next;
        self.current.enter(hooks);
        self.transitions.push(StateTransition { from, to });

        tracing::debug!(?from, ?to, "combat transition");
        Ok(())
    }

    /// Take all queued notifications in the order they happened
    pub fn drain_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.transitions)
    }

    /// Between rounds: back to Idle regardless of the current state
    pub fn reset(&mut self, hooks: &mut dyn CombatHooks) {
        self.current.exit(hooks);
        self.current = CombatState::Idle;
        self.current.enter(hooks);
        self.transitions.clear();
    }
}
