//! Driver configuration: engine settings plus curse thresholds.
//!
//! ```toml
//! [engine]
//! difficulty = "easy"
//!
//! [curse]
//! pawn = 2
//! knight = 3
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chess_core::CurseRules;
use minimax_engine::EngineConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub engine: EngineConfig,
    pub curse: CurseRules,
}

impl PlayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlayConfig = toml::from_str(text)?;
        config.engine.validate()?;
        Ok(config)
    }
}
