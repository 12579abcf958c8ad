//! Initialize repcoach in a directory

use repcoach::adapters::toml::write_starter;
use repcoach::output::{OperationResult, OutputMode};
use repcoach::paths;

/// Write a starter rules file in the current directory
pub fn init(force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = paths::rules_file();
    let written = write_starter(&path, force)?;

    let result = if written {
        OperationResult {
            success: true,
            message: format!(
                "Created {} with squat and push-up rules.\n\nNext steps:\n  \
                 repcoach rules list\n  \
                 repcoach analyze session.jsonl --exercise squat",
                path.display()
            ),
        }
    } else {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists).\nUse --force to overwrite.",
                path.display()
            ),
        }
    };
    result.render(mode);

    Ok(())
}
