//! Attack catalogue
//!
//! Three attack types, each with frame data that drives when the hit
//! connects and when the attack animation completes.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{HIT_STUN_HEAVY_TICKS, HIT_STUN_LIGHT_TICKS};

/// Attack type - the index order is part of the configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    /// Fast, longest reach, lowest damage
    Jab,
    /// Medium speed and reach
    Hook,
    /// Slow, close range, heavy
    Uppercut,
}

impl AttackType {
    pub const ALL: [AttackType; 3] = [AttackType::Jab, AttackType::Hook, AttackType::Uppercut];

    pub fn index(self) -> usize {
        match self {
            AttackType::Jab => 0,
            AttackType::Hook => 1,
            AttackType::Uppercut => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<AttackType> {
        Self::ALL.get(index).copied()
    }

    /// Severity of the reaction this attack inflicts on a clean hit
    pub fn hit_severity(self) -> HitSeverity {
        match self {
            AttackType::Jab | AttackType::Hook => HitSeverity::Light,
            AttackType::Uppercut => HitSeverity::Heavy,
        }
    }
}

/// How hard a hit reaction is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitSeverity {
    Light,
    Heavy,
}

impl HitSeverity {
    /// Length of the hit-reaction animation
    pub fn stun_ticks(self) -> u32 {
        match self {
            HitSeverity::Light => HIT_STUN_LIGHT_TICKS,
            HitSeverity::Heavy => HIT_STUN_HEAVY_TICKS,
        }
    }
}

/// Frame data for one attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackData {
    /// Base damage before scaling and bonuses
    pub damage: f32,
    /// Tick (from attack start) on which the hit connects
    pub active_frame: u32,
    /// Total animation length in ticks
    pub total_frames: u32,
    /// Maximum distance at which the hit connects
    pub reach: f32,
}

impl AttackData {
    pub fn jab() -> Self {
        Self {
            damage: 5.0,
            active_frame: 5,
            total_frames: 14,
            reach: 3.2,
        }
    }

    pub fn hook() -> Self {
        Self {
            damage: 9.0,
            active_frame: 8,
            total_frames: 22,
            reach: 2.6,
        }
    }

    pub fn uppercut() -> Self {
        Self {
            damage: 14.0,
            active_frame: 11,
            total_frames: 28,
            reach: 1.9,
        }
    }

    /// Sanitize frame data so the hit frame always lies inside the animation
    pub fn sanitized(mut self) -> Self {
        self.damage = self.damage.max(0.0);
        self.total_frames = self.total_frames.max(1);
        self.active_frame = self.active_frame.min(self.total_frames - 1);
        self.reach = self.reach.max(0.0);
        self
    }
}

/// Frame data for every attack type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackSet {
    #[serde(default = "AttackData::jab")]
    pub jab: AttackData,
    #[serde(default = "AttackData::hook")]
    pub hook: AttackData,
    #[serde(default = "AttackData::uppercut")]
    pub uppercut: AttackData,
}

impl Default for AttackSet {
    fn default() -> Self {
        Self {
            jab: AttackData::jab(),
            hook: AttackData::hook(),
            uppercut: AttackData::uppercut(),
        }
    }
}

impl AttackSet {
    pub fn get(&self, attack: AttackType) -> &AttackData {
        match attack {
            AttackType::Jab => &self.jab,
            AttackType::Hook => &self.hook,
            AttackType::Uppercut => &self.uppercut,
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            jab: self.jab.sanitized(),
            hook: self.hook.sanitized(),
            uppercut: self.uppercut.sanitized(),
        }
    }
}
