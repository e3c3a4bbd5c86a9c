use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning for the reversi heuristic agent. Every field has a default, so a
/// partial object from JS is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Fixed score of a corner cell.
    pub corner_score: f32,
    /// Divides the score of a cell next to an empty corner.
    pub corner_adjacent_divisor: f32,
    /// Multiplies the score of a cell two steps from its corner.
    pub buffer_multiplier: f32,
    /// Added to cells on the same odd/even lattice as their corner.
    pub parity_bonus: f32,
    /// Chance that an equally scored cell replaces the current pick.
    pub swap_probability: f64,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            corner_score: 100.0,
            corner_adjacent_divisor: 10.0,
            buffer_multiplier: 2.0,
            parity_bonus: 0.5,
            swap_probability: 0.5,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corner_score.is_nan() || self.corner_score <= 0.0 {
            return Err(ConfigError::Validation(
                "corner_score must be > 0".into(),
            ));
        }
        if self.corner_adjacent_divisor.is_nan() || self.corner_adjacent_divisor < 1.0 {
            return Err(ConfigError::Validation(
                "corner_adjacent_divisor must be >= 1".into(),
            ));
        }
        if self.buffer_multiplier.is_nan() || self.buffer_multiplier < 1.0 {
            return Err(ConfigError::Validation(
                "buffer_multiplier must be >= 1".into(),
            ));
        }
        if self.parity_bonus.is_nan() || self.parity_bonus < 0.0 {
            return Err(ConfigError::Validation(
                "parity_bonus must be >= 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.swap_probability) {
            return Err(ConfigError::Validation(
                "swap_probability must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
