//! Init command implementation

use crate::cli::InitArgs;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::InitOutput;
use crate::workspace::{session_path, CONFIG_FILE, WORKSPACE_DIR};
use anyhow::{Context, Result};
use ntgs_core::config::LayeredConfig;
use ntgs_core::session::{load_snapshot, SessionFile};
use ntgs_core::{ConfigurationState, TemplateRegistry};
use std::fs;

pub fn execute(args: InitArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    // Check if workspace already exists
    let ntgs_dir = args.path.join(WORKSPACE_DIR);
    if ntgs_dir.exists() && !args.force {
        return Err(errors::workspace_exists(&args.path).into());
    }

    // Seed the session
    let state = match &args.from {
        Some(path) => {
            let snapshot = load_snapshot(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            ConfigurationState::new(Some(&snapshot))
        }
        None => ConfigurationState::from_registry(&TemplateRegistry::ntgs()),
    };
    let data_types = state.data_types();

    let defaults = LayeredConfig::with_defaults();
    let default_data_type = if data_types.contains(&defaults.default_data_type.value) {
        defaults.default_data_type.value.clone()
    } else {
        data_types.first().cloned().unwrap_or_default()
    };

    if dry_run {
        let seed = match &args.from {
            Some(path) => format!("Seeded from {}", path.display()),
            None => "Seeded from built-in NTGS defaults".to_string(),
        };
        let actions = vec![
            PlannedAction::new(
                ActionType::CreateDirectory,
                format!("Create .ntgs directory at {}", args.path.display()),
            ),
            PlannedAction::new(ActionType::CreateFile, "Create config.toml")
                .with_detail(format!("Match threshold: {}", defaults.match_threshold.value))
                .with_detail(format!("Default data type: {}", default_data_type)),
            PlannedAction::new(ActionType::CreateFile, "Create session.json")
                .with_detail(seed)
                .with_detail(format!("Data types: {}", data_types.join(", "))),
        ];

        display_planned_actions(output, &actions)?;
        return Ok(());
    }

    // Create .ntgs directory
    fs::create_dir_all(&ntgs_dir).context("Failed to create .ntgs directory")?;

    // Create config.toml
    let config_path = ntgs_dir.join(CONFIG_FILE);
    let config_toml = format!(
        r#"# NTGS Workspace Configuration

# Minimum score (0 to 1) for a source column to be suggested
match_threshold = {:?}

# Match column names case-sensitively
case_sensitive = {}

# Number of ranked suggestions shown per field
suggestion_count = {}

# Data type used when a command does not name one
default_data_type = "{}"
"#,
        defaults.match_threshold.value,
        defaults.case_sensitive.value,
        defaults.suggestion_count.value,
        default_data_type
    );

    fs::write(&config_path, config_toml).context("Failed to write config.toml")?;

    // Create session.json
    let session_path = session_path(&args.path);
    SessionFile::new(&state)
        .save(&session_path)
        .context("Failed to write session.json")?;

    // Output success message
    if output.is_json() {
        let json_output = InitOutput {
            workspace_path: args.path.display().to_string(),
            session_path: session_path.display().to_string(),
            seeded_from: args.from.as_ref().map(|path| path.display().to_string()),
            data_types,
        };
        output.result(json_output)?;
    } else {
        output.success(format!("Initialized NTGS workspace at {}", args.path.display()));

        output.section("Session");
        output.kv("Data Types", data_types.join(", "));
        output.kv("Default Data Type", default_data_type);
        if let Some(path) = &args.from {
            output.kv("Seeded From", path.display());
        }
    }

    Ok(())
}
