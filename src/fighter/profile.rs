//! Fighter profiles loaded from TOML
//!
//! A profile bundles every timing/resource contract for one fighter type.
//! Records are validated once on load and treated as immutable after.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::combat::attack::AttackSet;
use crate::combat::combo::{ComboChainData, ComboSequenceData};
use crate::combat::constants::{BLOCK_DAMAGE_REDUCTION, MAX_HEALTH};
use crate::combat::dodge::DodgeData;
use crate::combat::parry::ParryData;
use crate::combat::stamina::StaminaData;
use crate::core::error::ConfigError;

fn default_max_health() -> f32 {
    MAX_HEALTH
}

fn default_block_reduction() -> f32 {
    BLOCK_DAMAGE_REDUCTION
}

fn default_walk_speed() -> f32 {
    3.0
}

fn default_dodge() -> Option<DodgeData> {
    Some(DodgeData::default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterProfile {
    /// Name of this profile (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    /// Fraction of damage removed while Blocking
    #[serde(default = "default_block_reduction")]
    pub block_damage_reduction: f32,
    /// World units per second
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    #[serde(default)]
    pub attacks: AttackSet,
    #[serde(default = "default_dodge")]
    pub dodge: Option<DodgeData>,
    #[serde(default)]
    pub parry: ParryData,
    #[serde(default)]
    pub stamina: StaminaData,
    #[serde(default)]
    pub combo: ComboChainData,
    #[serde(default)]
    pub sequences: Vec<ComboSequenceData>,
}

impl Default for FighterProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_health: MAX_HEALTH,
            block_damage_reduction: BLOCK_DAMAGE_REDUCTION,
            walk_speed: default_walk_speed(),
            attacks: AttackSet::default(),
            dodge: default_dodge(),
            parry: ParryData::default(),
            stamina: StaminaData::default(),
            combo: ComboChainData::default(),
            sequences: Vec::new(),
        }
    }
}

impl FighterProfile {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let profile: FighterProfile = toml::from_str(contents)?;
        profile.validated()
    }

    /// Hard-fail on impossible timing, clamp the rest
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !(self.max_health > 0.0) {
            return Err(ConfigError::invalid(
                "FighterProfile",
                format!("max_health ({}) must be > 0", self.max_health),
            ));
        }
        if let Some(dodge) = &self.dodge {
            dodge.validate()?;
        }
        self.parry.validate()?;
        self.stamina = self.stamina.validated()?;
        self.combo = self.combo.sanitized();
        self.sequences = self
            .sequences
            .into_iter()
            .map(ComboSequenceData::validated)
            .collect::<Result<Vec<_>, _>>()?;
        self.attacks = self.attacks.sanitized();
        self.block_damage_reduction = self.block_damage_reduction.clamp(0.0, 1.0);
        self.walk_speed = self.walk_speed.max(0.0);
        Ok(self)
    }
}

/// Load profile from TOML file
///
/// Loads from `data/profiles/{name}.toml`
pub fn load_profile(name: &str) -> Result<FighterProfile, ConfigError> {
    let path = PathBuf::from("data/profiles").join(format!("{}.toml", name));

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut profile = FighterProfile::from_toml_str(&contents)?;
    profile.name = name.to_string();
    Ok(profile)
}
