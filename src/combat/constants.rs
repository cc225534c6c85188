//! Combat system constants - all tunable defaults in one place
//!
//! Frame values are ticks at `TICK_RATE` (60/s).

// Knockdown recovery
pub const KNOCKDOWN_RECOVERY_TICKS: u32 = 60;
pub const SPECIAL_KNOCKDOWN_RECOVERY_TICKS: u32 = 120;

// Hit reactions
pub const HIT_STUN_LIGHT_TICKS: u32 = 10;
pub const HIT_STUN_HEAVY_TICKS: u32 = 20;

// Dodge defaults
pub const DODGE_DURATION: u32 = 18;
pub const DODGE_IFRAME_START: u32 = 2;
pub const DODGE_IFRAME_DURATION: u32 = 8;
pub const DODGE_COOLDOWN: u32 = 30;
pub const DODGE_DISTANCE: f32 = 2.5;

// Parry defaults
pub const PARRY_WINDOW: u32 = 6;
pub const PARRY_SUCCESS_DURATION: u32 = 20;
pub const PARRY_COOLDOWN: u32 = 30;
pub const PARRY_STAGGER_DURATION: u32 = 45;
pub const PARRY_COUNTER_WINDOW: u32 = 30;
pub const PARRY_COUNTER_MULTIPLIER: f32 = 1.5;

// Stamina defaults
pub const MAX_STAMINA: f32 = 100.0;
pub const STAMINA_REGEN_PER_SECOND: f32 = 15.0;
pub const EXHAUSTED_REGEN_MULTIPLIER: f32 = 0.5;
pub const EXHAUSTION_MIN_DURATION_SECS: f32 = 2.0;
pub const EXHAUSTION_RECOVERY_THRESHOLD: f32 = 30.0;

// Combo defaults
pub const COMBO_TIMEOUT: u32 = 90;
pub const COMBO_BREAK_WINDOW: u32 = 12;
pub const COMBO_SEQUENCE_WINDOW: u32 = 26;
pub const DEFAULT_DAMAGE_SCALING: [f32; 4] = [1.0, 0.75, 0.5, 0.5];
pub const MIN_DAMAGE_SCALING: f32 = 0.1;
pub const MAX_DAMAGE_SCALING: f32 = 1.0;
pub const MIN_SEQUENCE_BONUS: f32 = 1.0;
pub const MAX_SEQUENCE_BONUS: f32 = 3.0;

// Health
pub const MAX_HEALTH: f32 = 100.0;
pub const BLOCK_DAMAGE_REDUCTION: f32 = 0.75;

// Hit resolution
/// Combo hit number from which a clean hit knocks the defender down
pub const KNOCKDOWN_COMBO_HITS: u32 = 4;
/// Distance a clean hit pushes the defender, before sequence bonuses
pub const HIT_KNOCKBACK: f32 = 0.3;
