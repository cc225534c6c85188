use thiserror::Error;

use crate::combat::state::CombatStateKind;

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {record}: {reason}")]
    Invalid { record: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(record: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            record,
            reason: reason.into(),
        }
    }
}

/// A rejected combat state transition
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Transition {from:?} -> {to:?} is not allowed")]
    Rejected {
        from: CombatStateKind,
        to: CombatStateKind,
    },

    #[error("Fighter is knocked out; transition to {to:?} rejected")]
    Terminal { to: CombatStateKind },
}

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
