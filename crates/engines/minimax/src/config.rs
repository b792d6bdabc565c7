//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! difficulty = "hard"
//!
//! [search]
//! underpromotions = false
//! seed = 42
//!
//! [rules]
//! cursed_pawn_capture = "pawn_diagonal"
//!
//! [tiers.easy]
//! depth = 2
//! random_move_probability = 0.3
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use chess_core::VariantRules;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Maps the 1/2/3 level numbers used by players. Unknown levels fall
    /// back to `Easy`.
    pub fn from_level(level: u8) -> Self {
        match level {
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Search depth and randomness of one difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Plies searched; values below 1 are treated as 1.
    pub depth: u8,
    /// Chance of playing a uniformly random legal move instead of searching.
    #[serde(default)]
    pub random_move_probability: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: Tier,
    pub medium: Tier,
    pub hard: Tier,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: Tier {
                depth: 2,
                random_move_probability: 0.3,
            },
            medium: Tier {
                depth: 3,
                random_move_probability: 0.0,
            },
            hard: Tier {
                depth: 4,
                random_move_probability: 0.0,
            },
        }
    }
}

impl TierTable {
    pub fn get(&self, difficulty: Difficulty) -> Tier {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search rook/bishop/knight promotions too. Off by default: only the
    /// queen promotion is simulated.
    pub underpromotions: bool,
    /// Fixed RNG seed for reproducible random-tier moves.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub search: SearchConfig,
    pub rules: VariantRules,
    pub tiers: TierTable,
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn tier(&self) -> Tier {
        self.tiers.get(self.difficulty)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tier) in [
            ("easy", self.tiers.easy),
            ("medium", self.tiers.medium),
            ("hard", self.tiers.hard),
        ] {
            let p = tier.random_move_probability;
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "tiers.{name}.random_move_probability must be within 0..=1, got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
