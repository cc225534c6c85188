//! Opponent AI
//!
//! Architecture: self-directed decision states + TOML personality
//! - AiStateMachine owns the active AiState and validates its requests
//! - AiPersonality holds every threshold the states consult
//! - AiDriver turns the active state into button presses for the fighter

pub mod context;
pub mod driver;
pub mod machine;
pub mod personality;
pub mod state;

pub use context::AiContext;
pub use driver::{AiCommand, AiDriver};
pub use machine::{AiStateMachine, AiTransition};
pub use personality::{load_personality, AiPersonality};
pub use state::{choose_attack, AiState, AiStateKind, AttackPlan, DefendHold};
