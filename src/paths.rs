//! Centralized path definitions for repcoach
//!
//! ```text
//! project/
//! └── .repcoach.toml            # Exercise rules
//!
//! ~/.config/repcoach/
//! └── config.toml               # Engine settings, default rules path
//! ```

use std::path::PathBuf;

/// Rules filename looked up in the working directory
pub const RULES_FILE: &str = ".repcoach.toml";

/// Global config directory name (under `~/.config`)
const GLOBAL_DIR: &str = ".config/repcoach";

/// Global config filename
const CONFIG_FILE: &str = "config.toml";

/// Path to the rules file in the current directory
#[must_use]
pub fn rules_file() -> PathBuf {
    PathBuf::from(RULES_FILE)
}

/// Get the global config directory
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(CONFIG_FILE)
}
