//! Rules commands (list, show)

use std::path::Path;

use repcoach::adapters::toml::TomlRulesRepository;
use repcoach::core::ports::RulesRepository;
use repcoach::output::{OutputMode, RuleDetail, RulesListResult};

use super::{load_config, rules_path};
use crate::cli::RulesAction;

/// Handle rules subcommands
pub fn rules_cmd(action: RulesAction, config: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config)?;

    match action {
        RulesAction::List { rules } => {
            let repo = TomlRulesRepository::new(rules_path(rules.as_deref(), &config)?);
            let result = RulesListResult {
                source: repo.path().display().to_string(),
                exercises: repo.list()?,
            };
            result.render(mode);
        },
        RulesAction::Show { exercise, rules } => {
            let repo = TomlRulesRepository::new(rules_path(rules.as_deref(), &config)?);
            let result = RuleDetail {
                source: repo.path().display().to_string(),
                rules: repo.get(&exercise)?,
            };
            result.render(mode);
        },
    }

    Ok(())
}
