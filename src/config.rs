//! Configuration management
//!
//! Engine settings are plain constructor arguments for [`FormAnalyzer`];
//! this module only adds a TOML file layer on top. The global file lives at
//! `~/.config/repcoach/config.toml`.
//!
//! [`FormAnalyzer`]: crate::core::services::FormAnalyzer

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Where exercise rules come from
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Settings for one analysis engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum confidence for a landmark to be used, and for a whole pose to
    /// be analyzed at all
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Minimum time between spoken cues, in milliseconds
    #[serde(default = "default_feedback_cooldown_ms")]
    pub feedback_cooldown_ms: u64,
    /// Capacity of each history buffer
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Per-subscriber capacity of the event channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Run the built-in knee-cave safety check
    #[serde(default = "default_knee_cave_check")]
    pub knee_cave_check: bool,
}

const fn default_min_confidence() -> f32 {
    0.5
}

const fn default_feedback_cooldown_ms() -> u64 {
    3000
}

const fn default_history_capacity() -> usize {
    100
}

const fn default_channel_capacity() -> usize {
    64
}

const fn default_knee_cave_check() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            feedback_cooldown_ms: default_feedback_cooldown_ms(),
            history_capacity: default_history_capacity(),
            channel_capacity: default_channel_capacity(),
            knee_cave_check: default_knee_cave_check(),
        }
    }
}

/// Rules source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules file to use when `--rules` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Get the global config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load the global config, or defaults if it does not exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if path.exists() { Self::load_from(&path) } else { Ok(Self::default()) }
    }

    /// Load a config file; missing keys fall back to defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save the config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
