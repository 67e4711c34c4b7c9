//! Export command implementation

use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use ntgs_core::conversion::ActiveConfiguration;
use std::fs;

pub fn execute(args: ExportArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let state = workspace.state();

    let json = if args.handoff {
        let active = ActiveConfiguration::manual(&state, &workspace.session.layers);
        serde_json::to_string_pretty(&active)?
    } else {
        serde_json::to_string_pretty(&state.export())?
    };

    match args.output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported configuration to {}", path.display());
            if output.is_json() {
                output.result(serde_json::json!({ "path": path.display().to_string() }))?;
            } else {
                output.success(format!("Exported configuration to {}", path.display()));
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}
