//! Turns the AI's decision state into simulated button presses and a
//! movement request for the physics collaborator.

use crate::ai::context::AiContext;
use crate::ai::state::AiState;
use crate::core::types::Vec2;
use crate::input::InputCommand;

/// One tick of synthesized input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiCommand {
    /// Desired movement direction in world space (unit length or zero)
    pub movement: Vec2,
    pub inputs: Vec<InputCommand>,
}

/// Tracks held buttons so presses and releases pair up
#[derive(Debug, Clone, Default)]
pub struct AiDriver {
    block_held: bool,
}

impl AiDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_held(&self) -> bool {
        self.block_held
    }

    pub fn command(&mut self, state: &AiState, ctx: &AiContext) -> AiCommand {
        let mut command = AiCommand::default();

        let defending = matches!(state, AiState::Defend(_));
        if !defending && self.block_held {
            command.inputs.push(InputCommand::BlockReleased);
            self.block_held = false;
        }

        match state {
            AiState::Observe => {}
            AiState::Approach => command.movement = ctx.toward_opponent(),
            AiState::Retreat => command.movement = -ctx.toward_opponent(),
            AiState::Attack(plan) => {
                if let (Some(attack), false) = (plan.chosen, plan.executed) {
                    command.inputs.push(InputCommand::Attack(attack));
                }
            }
            AiState::Defend(_) => {
                if !self.block_held {
                    command.inputs.push(InputCommand::BlockPressed);
                    self.block_held = true;
                }
            }
        }

        command
    }

    pub fn reset(&mut self) {
        self.block_held = false;
    }
}
