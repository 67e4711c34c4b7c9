//! Read-only commands: types, show, get

use crate::cli::{GetArgs, ShowArgs};
use crate::output::OutputWriter;
use crate::output_types::{DataTypeInfo, ShowOutput, TypesOutput, ValueOutput};
use crate::workspace::Workspace;
use anyhow::Result;
use ntgs_core::conversion::{form_fields, FieldKind};
use ntgs_core::{ConfigurationState, TemplateRegistry};
use serde::Serialize;
use tabled::Tabled;

pub fn types(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let state = workspace.state();

    let mut data_types = Vec::new();
    for name in state.data_types() {
        let field_count = state.schema(&name)?.len();
        let layer = workspace.session.layers.get(&name).cloned().flatten();
        data_types.push(DataTypeInfo { name, field_count, layer });
    }

    if output.is_json() {
        return output.result(TypesOutput { data_types });
    }

    #[derive(Tabled, Serialize)]
    struct TypeRow {
        #[tabled(rename = "Data Type")]
        name: String,
        #[tabled(rename = "Fields")]
        field_count: usize,
        #[tabled(rename = "Layer")]
        layer: String,
    }

    let rows: Vec<TypeRow> = data_types
        .into_iter()
        .map(|info| TypeRow {
            name: info.name,
            field_count: info.field_count,
            layer: info.layer.map(|l| l.layer_name).unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output.section("Data Types");
    output.table(rows)
}

pub fn show(args: ShowArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let data_type = workspace.data_type_or_default(args.data_type);

    let (source, state) = if args.defaults {
        ("defaults", ConfigurationState::from_registry(&TemplateRegistry::ntgs()))
    } else {
        ("session", workspace.state())
    };
    let fields = form_fields(&state, &data_type)?;

    if output.is_json() {
        return output.result(ShowOutput { data_type, source, fields });
    }

    #[derive(Tabled, Serialize)]
    struct FieldRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Label")]
        label: String,
        #[tabled(rename = "Kind")]
        kind: String,
        #[tabled(rename = "Shape")]
        shape: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<FieldRow> = fields
        .into_iter()
        .map(|field| FieldRow {
            kind: match field.kind {
                FieldKind::Column => "column".to_string(),
                FieldKind::Text => "text".to_string(),
            },
            shape: field.value.shape().to_string(),
            key: field.key,
            label: field.label,
            value: field.text,
        })
        .collect();

    output.section(format!("{} ({})", data_type, source));
    output.table(rows)
}

pub fn get(args: GetArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let value = workspace.state().value(&args.data_type, &args.key)?;

    if output.is_json() {
        output.result(ValueOutput {
            data_type: args.data_type,
            key: args.key,
            shape: value.shape(),
            value,
        })
    } else {
        println!("{}", value.display_text());
        Ok(())
    }
}
