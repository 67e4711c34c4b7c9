//! Commands that change field values: set, update, edit

use crate::cli::{EditArgs, SetArgs, UpdateArgs};
use crate::commands::commit_state;
use crate::errors;
use crate::interactive;
use crate::output::OutputWriter;
use crate::output_types::UpdateOutput;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use ntgs_core::conversion::form_fields;
use ntgs_core::matching::ColumnMatcher;
use ntgs_core::{ConfigurationState, FieldValue};

pub fn set(
    args: SetArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let value = if args.raw { parse_raw(&args.value)? } else { FieldValue::from(args.value) };

    let mut state = workspace.state();
    state.set_value(&args.data_type, &args.key, value)?;

    let keys = vec![args.key];
    write_back(args.data_type, &keys, &state, workspace, output, dry_run)
}

pub fn update(
    args: UpdateArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let assignments = args
        .assignments
        .iter()
        .map(|assignment| parse_assignment(assignment))
        .collect::<Result<Vec<_>>>()?;

    let mut state = workspace.state();
    let updates = assignments.iter().map(|(key, value)| (key.as_str(), value.as_str()));
    state.update_values(&args.data_type, updates)?;

    let keys: Vec<String> = assignments.into_iter().map(|(key, _)| key).collect();
    write_back(args.data_type, &keys, &state, workspace, output, dry_run)
}

pub fn interactive(
    args: EditArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let data_type = workspace.data_type_or_default(args.data_type);
    let mut state = workspace.state();
    let fields = form_fields(&state, &data_type)?;

    let matcher = ColumnMatcher::new(args.columns, workspace.settings.case_sensitive.value);
    let threshold = workspace.settings.match_threshold.value;

    let Some(edits) = interactive::prompt_form(&data_type, &fields, &matcher, threshold)? else {
        output.info("Edit cancelled, no changes were made");
        return Ok(());
    };

    if edits.is_empty() {
        output.info("No fields were changed");
        return Ok(());
    }

    let updates = edits.iter().map(|(key, value)| (key.as_str(), value.as_str()));
    state.update_values(&data_type, updates)?;

    let keys: Vec<String> = edits.into_iter().map(|(key, _)| key).collect();
    write_back(data_type, &keys, &state, workspace, output, dry_run)
}

/// Commit the edited state and report the stored values of `keys`
fn write_back(
    data_type: String,
    keys: &[String],
    state: &ConfigurationState,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    if !commit_state(workspace, state, output, dry_run)? {
        return Ok(());
    }

    let mut stored = IndexMap::new();
    for key in keys {
        stored.insert(key.clone(), state.value(&data_type, key)?);
    }

    if output.is_json() {
        output.result(UpdateOutput { data_type, stored })
    } else {
        for (key, value) in &stored {
            output.success(format!("{}.{} = {} ({})", data_type, key, value, value.shape()));
        }
        Ok(())
    }
}

/// Split `KEY=VALUE` at the first `=`
fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(errors::invalid_assignment(assignment).into()),
    }
}

/// Parse a JSON literal such as `120`, `["a", "b"]` or `null`
fn parse_raw(text: &str) -> Result<FieldValue> {
    let json: serde_json::Value = serde_json::from_str(text)
        .with_context(|| format!("'{}' is not a valid JSON literal", text))?;
    Ok(FieldValue::try_from(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("dip_column=DIP").unwrap(),
            ("dip_column".to_string(), "DIP".to_string())
        );
        assert_eq!(
            parse_assignment("ignore_codes=cover, Unknown").unwrap(),
            ("ignore_codes".to_string(), "cover, Unknown".to_string())
        );
        assert_eq!(parse_assignment("x=a=b").unwrap().1, "a=b");
        assert_eq!(parse_assignment("unset=").unwrap().1, "");
    }

    #[test]
    fn test_parse_assignment_rejects_missing_key() {
        assert!(parse_assignment("DIP").is_err());
        assert!(parse_assignment("=DIP").is_err());
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw("120").unwrap(), FieldValue::Integer(120));
        assert_eq!(parse_raw("1.5").unwrap(), FieldValue::Float(1.5));
        assert_eq!(parse_raw("null").unwrap(), FieldValue::Null);
        assert_eq!(
            parse_raw(r#"["cover", "Unknown"]"#).unwrap(),
            FieldValue::List(vec!["cover".to_string(), "Unknown".to_string()])
        );
        assert!(parse_raw("not json").is_err());
        assert!(parse_raw(r#"{"a": 1}"#).is_err());
    }
}
