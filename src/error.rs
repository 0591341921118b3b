//! Error types
//!
//! Configuration faults and level-up guard failures.

use std::path::PathBuf;

use crate::progression::Attribute;

/// Errors raised by the progression core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgressionError {
    #[error("Invalid curve parameter {parameter}: {value}")]
    InvalidCurve { parameter: &'static str, value: f64 },

    #[error("Invalid setting {parameter}: {value}")]
    InvalidSetting { parameter: &'static str, value: f64 },

    #[error("Level-up limit of {limit} per tick exceeded at level {level}; check curve tuning")]
    RunawayLevelUps { level: u32, limit: u32 },

    #[error("Curve requires 0 experience at level {level}; check curve tuning")]
    DegenerateRequirement { level: u32 },

    #[error("No stat points left to spend on {attribute}")]
    NoStatPoints { attribute: Attribute },
}

/// Errors raised while loading or exporting tuning data
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] ProgressionError),
}
