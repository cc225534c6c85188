//! Discrete button events, from a human input device or synthesized by the AI

use serde::{Deserialize, Serialize};

use crate::combat::attack::AttackType;
use crate::combat::dodge::DodgeDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCommand {
    Attack(AttackType),
    BlockPressed,
    BlockReleased,
    Dodge(DodgeDirection),
}

/// What the fighter did with an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    /// The active combat state does not allow it right now
    Rejected,
    NotEnoughStamina,
    OnCooldown,
}

impl InputOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, InputOutcome::Accepted)
    }
}
