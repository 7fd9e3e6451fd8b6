//! MCTS Search Configuration
//!
//! Tunable parameters for the decision engine. The exploration constant is
//! copied onto the search tree once per decision, so all nodes of one search
//! score with the same constant.

use serde::{Deserialize, Serialize};

use crate::{CardDuelError, Result};

/// MCTS search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of search iterations per decision
    /// Each iteration runs on an independently randomized clone of the battle
    /// Default: 100
    pub iterations: usize,

    /// UCB exploration constant
    /// Higher values = more exploration
    /// Default: 1.4
    pub exploration_constant: f64,

    /// Emit a search-tree dump at debug level after each decision
    /// Default: false
    pub verbose: bool,

    /// Fixed RNG seed for reproducible searches; None draws from OS entropy
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            exploration_constant: 1.4,
            verbose: false,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Validate that the configured values are usable
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be at least 1".to_string());
        }
        if self.exploration_constant <= 0.0 {
            return Err(format!(
                "exploration_constant must be positive, got {}",
                self.exploration_constant
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: MctsConfig = serde_json::from_str(&raw)
            .map_err(|e| CardDuelError::Config(format!("invalid config file: {e}")))?;
        config.validate().map_err(CardDuelError::Config)?;
        Ok(config)
    }
}
