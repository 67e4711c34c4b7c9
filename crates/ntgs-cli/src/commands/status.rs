//! Status command implementation

use crate::output::OutputWriter;
use crate::output_types::{SettingInfo, StatusOutput};
use crate::workspace::Workspace;
use anyhow::Result;

const SETTING_KEYS: [&str; 4] =
    ["match_threshold", "case_sensitive", "suggestion_count", "default_data_type"];

pub fn execute(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let session = &workspace.session;
    let data_types: Vec<String> = session.config.keys().cloned().collect();
    let selected_layers = session.layers.values().filter(|layer| layer.is_some()).count();

    let inspection = workspace.settings.to_inspection_map();
    let settings: Vec<SettingInfo> = SETTING_KEYS
        .iter()
        .filter_map(|key| {
            let (value, source) = inspection.get(*key)?;
            Some(SettingInfo {
                key: key.to_string(),
                value: value.clone(),
                source: format!("{:?}", source),
            })
        })
        .collect();

    if output.is_json() {
        return output.result(StatusOutput {
            workspace_path: workspace.root.display().to_string(),
            session_path: workspace.session_path().display().to_string(),
            saved_at: session.saved_at,
            data_types,
            selected_layers,
            settings,
        });
    }

    output.section("Workspace Status");
    output.kv("Location", workspace.root.display());
    output.kv("Session", workspace.session_path().display());
    output.kv("Config", workspace.config_path().display());
    output.kv("Saved At", session.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));

    output.section("Session");
    output.kv("Data Types", data_types.join(", "));
    output.kv("Selected Layers", format!("{} of {}", selected_layers, data_types.len()));
    for (data_type, layer) in &session.layers {
        let Some(layer) = layer else { continue };
        output.kv(format!("  {}", data_type), format!("{} ({})", layer.layer_name, layer.layer_id));
    }

    output.section("Settings");
    output.table(settings)
}
