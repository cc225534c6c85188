pub mod attack;
pub mod combo;
pub mod constants;
pub mod dodge;
pub mod hooks;
pub mod machine;
pub mod parry;
pub mod stamina;
pub mod state;

pub use attack::{AttackData, AttackSet, AttackType, HitSeverity};
pub use combo::{ComboChainData, ComboHit, ComboSequenceData, ComboTracker, SequenceBonus};
pub use dodge::{DodgeData, DodgeDirection, DodgeMotion};
pub use hooks::{AnimationCue, CombatHooks, RecordingHooks};
pub use machine::{CombatStateMachine, StateTransition};
pub use parry::{ParryData, ParryOutcome, ParryTracker};
pub use stamina::{Stamina, StaminaData};
pub use state::{transition_rule, CombatState, CombatStateKind, Exhaustion, TransitionRule};
