//! Reset command implementation

use crate::cli::ResetArgs;
use crate::commands::commit_state;
use crate::output::OutputWriter;
use crate::output_types::ResetOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use ntgs_core::{ConfigurationState, TemplateRegistry};

pub fn execute(
    args: ResetArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let registry = TemplateRegistry::ntgs();

    let state = match &args.data_type {
        Some(data_type) => {
            let mut state = workspace.state();
            state.restore_defaults(&registry, data_type)?;
            state
        }
        None => {
            let state = ConfigurationState::from_registry(&registry);
            // Keep layer selections for the data types that remain
            let data_types = state.data_types();
            let layers = &mut workspace.session.layers;
            layers.retain(|data_type, _| data_types.contains(data_type));
            for data_type in data_types {
                layers.entry(data_type).or_insert(None);
            }
            state
        }
    };

    if !commit_state(workspace, &state, output, dry_run)? {
        return Ok(());
    }

    let data_types = match args.data_type {
        Some(data_type) => vec![data_type],
        None => state.data_types(),
    };

    if output.is_json() {
        output.result(ResetOutput { data_types })
    } else {
        output.success(format!("Restored defaults for {}", data_types.join(", ")));
        Ok(())
    }
}
