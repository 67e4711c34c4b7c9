//! Command implementations

mod edit;
mod export;
mod init;
mod layer;
mod matching;
mod reset;
mod show;
mod status;

use crate::cli::{Cli, Commands};
use crate::dry_run::{display_planned_actions, PlannedAction};
use crate::output::OutputWriter;
use crate::workspace::Workspace;
use anyhow::Result;
use ntgs_core::config::CliConfigOverrides;
use ntgs_core::{ConfigSnapshot, ConfigurationState};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let overrides = CliConfigOverrides {
        match_threshold: cli.threshold,
        case_sensitive: cli.case_sensitive.then_some(true),
        ..Default::default()
    };

    let dry_run = cli.dry_run;

    match cli.command {
        Commands::Init(args) => init::execute(args, &output, dry_run),
        Commands::Types => show::types(&Workspace::open(overrides)?, &output),
        Commands::Show(args) => show::show(args, &Workspace::open(overrides)?, &output),
        Commands::Get(args) => show::get(args, &Workspace::open(overrides)?, &output),
        Commands::Set(args) => edit::set(args, &mut Workspace::open(overrides)?, &output, dry_run),
        Commands::Update(args) => {
            edit::update(args, &mut Workspace::open(overrides)?, &output, dry_run)
        }
        Commands::Edit(args) => {
            edit::interactive(args, &mut Workspace::open(overrides)?, &output, dry_run)
        }
        Commands::Match(args) => {
            matching::execute(args, &mut Workspace::open(overrides)?, &output, dry_run)
        }
        Commands::Layer(args) => {
            layer::execute(args, &mut Workspace::open(overrides)?, &output, dry_run)
        }
        Commands::Reset(args) => {
            reset::execute(args, &mut Workspace::open(overrides)?, &output, dry_run)
        }
        Commands::Export(args) => export::execute(args, &Workspace::open(overrides)?, &output),
        Commands::Status => status::execute(&Workspace::open(overrides)?, &output),
    }
}

/// Save `state` as the session configuration.
///
/// In dry-run mode the field changes are listed instead and `false` is
/// returned.
pub(crate) fn commit_state(
    workspace: &mut Workspace,
    state: &ConfigurationState,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<bool> {
    if dry_run {
        let changes = describe_changes(&workspace.session.config, &state.export());
        let action = PlannedAction::session_update(&workspace.session_path(), changes);
        display_planned_actions(output, &[action])?;
        return Ok(false);
    }

    workspace.commit(state)?;
    Ok(true)
}

/// Human-readable list of field changes between two snapshots
pub(crate) fn describe_changes(before: &ConfigSnapshot, after: &ConfigSnapshot) -> Vec<String> {
    let mut changes = Vec::new();

    for (data_type, fields) in after {
        let previous = before.get(data_type);
        for (key, value) in fields {
            let old = previous.and_then(|schema| schema.get(key));
            if old != Some(value) {
                let old_text = old
                    .map_or_else(|| "(unset)".to_string(), |v| format!("{:?}", v.display_text()));
                changes.push(format!(
                    "{}.{}: {} -> {:?}",
                    data_type,
                    key,
                    old_text,
                    value.display_text()
                ));
            }
        }
        if let Some(previous) = previous {
            for key in previous.keys().filter(|key| !fields.contains_key(*key)) {
                changes.push(format!("{}.{}: removed", data_type, key));
            }
        }
    }

    for data_type in before.keys().filter(|data_type| !after.contains_key(*data_type)) {
        changes.push(format!("{}: removed", data_type));
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntgs_core::{FieldSchema, FieldValue};

    #[test]
    fn test_describe_changes() {
        let mut state = ConfigurationState::default();
        let before = state.export();

        state.set_value("fault", "dip_column", "DIP").unwrap();
        state.set_value("fault", "extra", FieldValue::Integer(3)).unwrap();

        let changes = describe_changes(&before, &state.export());
        assert_eq!(
            changes,
            vec![
                r#"fault.dip_column: "Dip" -> "DIP""#.to_string(),
                r#"fault.extra: (unset) -> "3""#.to_string(),
            ]
        );
    }

    #[test]
    fn test_describe_removed_data_type() {
        let mut before = ConfigurationState::default().export();
        before.insert(
            "survey".to_string(),
            FieldSchema::from([("x_column".to_string(), FieldValue::from("E"))]),
        );
        let after = ConfigurationState::default().export();

        assert_eq!(describe_changes(&before, &after), vec!["survey: removed".to_string()]);
    }

    #[test]
    fn test_describe_no_changes() {
        let state = ConfigurationState::default();
        assert!(describe_changes(&state.export(), &state.export()).is_empty());
    }
}
