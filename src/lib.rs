//! Arena Duel - two-fighter real-time combat simulation core
//!
//! Each fighter runs a combat state machine fed by timing and resource
//! contracts (dodge, parry, stamina, combo). A separate decision machine
//! drives the computer-controlled fighter by synthesizing input.

pub mod ai;
pub mod combat;
pub mod core;
pub mod duel;
pub mod fighter;
pub mod input;
