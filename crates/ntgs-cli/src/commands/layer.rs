//! Layer command implementation

use crate::cli::LayerArgs;
use crate::dry_run::{display_planned_actions, PlannedAction};
use crate::output::OutputWriter;
use crate::output_types::LayerOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use ntgs_core::conversion::LayerSelection;
use ntgs_core::NtgsError;

pub fn execute(
    args: LayerArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    if !workspace.state().contains(&args.data_type) {
        return Err(NtgsError::UnknownDataType { data_type: args.data_type }.into());
    }

    let selection = args.layer_id.map(|layer_id| {
        let layer_name = args.name.unwrap_or_else(|| layer_id.clone());
        LayerSelection::new(layer_id, layer_name)
    });

    if dry_run {
        let detail = match &selection {
            Some(layer) => format!("{} -> {} ({})", args.data_type, layer.layer_name, layer.layer_id),
            None => format!("{} -> no layer", args.data_type),
        };
        let action = PlannedAction::session_update(&workspace.session_path(), vec![detail]);
        display_planned_actions(output, &[action])?;
        return Ok(());
    }

    workspace.session.layers.insert(args.data_type.clone(), selection.clone());
    workspace.save()?;

    if output.is_json() {
        output.result(LayerOutput { data_type: args.data_type, layer: selection })
    } else {
        match &selection {
            Some(layer) => output.success(format!(
                "Selected layer {} ({}) for {}",
                layer.layer_name, layer.layer_id, args.data_type
            )),
            None => output.success(format!("Cleared layer selection for {}", args.data_type)),
        }
        Ok(())
    }
}
