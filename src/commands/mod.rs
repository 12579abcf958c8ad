//! Command implementations

use std::path::{Path, PathBuf};

use repcoach::config::Config;
use repcoach::paths;

mod analyze;
mod init;
mod rules;

pub use analyze::{AnalyzeArgs, analyze};
pub use init::init;
pub use rules::rules_cmd;

/// Load the config named on the command line, or the global one
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Rules file to use: explicit flag, then config, then the working directory
fn rules_path(explicit: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.rules.path.clone())
        .unwrap_or_else(paths::rules_file);
    if !path.exists() {
        anyhow::bail!(
            "No rules file at {}. Run 'repcoach init' to create one.",
            path.display()
        );
    }
    Ok(path)
}
