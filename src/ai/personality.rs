//! AI personality configuration loaded from TOML
//!
//! Personalities hold every distance, health and probability threshold
//! the opponent's decision states consult.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::config::seconds_to_ticks;
use crate::core::error::ConfigError;

/// Distance thresholds (world units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Observe/Approach: defend against an attack closer than this
    pub defend_trigger: f32,
    /// Observe: too close, back off
    pub too_close: f32,
    /// Observe: too far, close in
    pub approach_beyond: f32,
    /// Observe: attack window lower bound
    pub attack_band_min: f32,
    /// Observe: attack window upper bound
    pub attack_band_max: f32,
    /// Approach: settle into Observe between these
    pub settle_min: f32,
    pub settle_max: f32,
    /// Approach: strike below this
    pub approach_attack_below: f32,
    /// Retreat: defend against an attack closer than this
    pub retreat_defend_trigger: f32,
    /// Retreat: far enough, stop retreating
    pub retreat_safe_distance: f32,
    /// Defend: counter-attack below this
    pub counter_distance: f32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            defend_trigger: 3.0,
            too_close: 1.5,
            approach_beyond: 4.0,
            attack_band_min: 2.0,
            attack_band_max: 3.5,
            settle_min: 2.0,
            settle_max: 3.0,
            approach_attack_below: 2.5,
            retreat_defend_trigger: 2.5,
            retreat_safe_distance: 3.5,
            counter_distance: 2.5,
        }
    }
}

/// Health thresholds (percent)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Observe: retreat when own health is below this
    pub cautious_below: f32,
    /// Retreat/Defend: desperate below this
    pub critical_below: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            cautious_below: 30.0,
            critical_below: 20.0,
        }
    }
}

/// Probabilities (0.0 to 1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Observe: chance per tick to attack while in the attack band
    pub observe_attack_chance: f32,
    /// Attack: chance to ignore distance and pick any attack
    pub random_attack_chance: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            observe_attack_chance: 0.5,
            random_attack_chance: 0.3,
        }
    }
}

/// Attack choice bands (world units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackBandConfig {
    /// At or below: heavy attack
    pub close_range: f32,
    /// At or below: one of the two medium attacks
    pub medium_range: f32,
}

impl Default for AttackBandConfig {
    fn default() -> Self {
        Self {
            close_range: 1.5,
            medium_range: 2.5,
        }
    }
}

/// Defend hold duration (seconds, converted to ticks on use)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub defend_min_secs: f32,
    pub defend_max_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            defend_min_secs: 0.5,
            defend_max_secs: 1.5,
        }
    }
}

impl TimingConfig {
    pub fn defend_tick_range(&self) -> (u32, u32) {
        (
            seconds_to_ticks(self.defend_min_secs),
            seconds_to_ticks(self.defend_max_secs),
        )
    }
}

/// Complete AI personality configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiPersonality {
    /// Name of this personality (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ranges: RangeConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub attack_bands: AttackBandConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Default for AiPersonality {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            ranges: RangeConfig::default(),
            health: HealthConfig::default(),
            behavior: BehaviorConfig::default(),
            attack_bands: AttackBandConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl AiPersonality {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let personality: AiPersonality = toml::from_str(contents)?;
        personality.validate()?;
        Ok(personality)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, p) in [
            ("observe_attack_chance", self.behavior.observe_attack_chance),
            ("random_attack_chance", self.behavior.random_attack_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid(
                    "AiPersonality",
                    format!("{} ({}) must be within [0, 1]", label, p),
                ));
            }
        }
        if self.timing.defend_min_secs > self.timing.defend_max_secs {
            return Err(ConfigError::invalid(
                "AiPersonality",
                "defend_min_secs must not exceed defend_max_secs",
            ));
        }
        if self.attack_bands.close_range > self.attack_bands.medium_range {
            return Err(ConfigError::invalid(
                "AiPersonality",
                "close_range must not exceed medium_range",
            ));
        }
        if self.ranges.attack_band_min > self.ranges.attack_band_max
            || self.ranges.settle_min > self.ranges.settle_max
        {
            return Err(ConfigError::invalid(
                "AiPersonality",
                "range bands must have min <= max",
            ));
        }
        Ok(())
    }
}

/// Load personality from TOML file
///
/// Loads from `data/ai_personalities/{name}.toml`
pub fn load_personality(name: &str) -> Result<AiPersonality, ConfigError> {
    let path = personality_path(name);

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut personality = AiPersonality::from_toml_str(&contents)?;
    personality.name = name.to_string();
    Ok(personality)
}

/// Get path to personality file
fn personality_path(name: &str) -> PathBuf {
    PathBuf::from("data/ai_personalities").join(format!("{}.toml", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_personality() {
        let personality = load_personality("default").expect("Should load default personality");
        assert_eq!(personality.name, "default");
        assert_eq!(personality.ranges.defend_trigger, 3.0);
        assert_eq!(personality.behavior.random_attack_chance, 0.3);
    }

    #[test]
    fn test_load_aggressive_personality() {
        let personality =
            load_personality("aggressive").expect("Should load aggressive personality");
        assert!(
            personality.behavior.observe_attack_chance > 0.5,
            "Aggressive should attack more often"
        );
    }

    #[test]
    fn test_missing_personality_is_io_error() {
        let err = load_personality("does_not_exist").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let personality = AiPersonality::from_toml_str(
            r#"
            [health]
            cautious_below = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(personality.health.cautious_below, 40.0);
        assert_eq!(personality.health.critical_below, 20.0);
        assert_eq!(personality.ranges.too_close, 1.5);
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let result = AiPersonality::from_toml_str(
            r#"
            [behavior]
            random_attack_chance = 1.5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defend_tick_range() {
        assert_eq!(TimingConfig::default().defend_tick_range(), (30, 90));
    }
}
