//! Match command implementation

use crate::cli::MatchArgs;
use crate::commands::commit_state;
use crate::output::OutputWriter;
use crate::output_types::{FieldMatchInfo, MatchOutput};
use crate::workspace::Workspace;
use anyhow::Result;
use ntgs_core::matching::{suggest_schema_columns, ColumnMatcher};
use serde::Serialize;
use tabled::Tabled;

pub fn execute(
    args: MatchArgs,
    workspace: &mut Workspace,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let settings = &workspace.settings;
    let threshold = settings.match_threshold.value;
    let suggestion_count = settings.suggestion_count.value;

    let mut state = workspace.state();
    let schema = state.schema(&args.data_type)?;
    let matcher = ColumnMatcher::new(args.columns, settings.case_sensitive.value);

    let matches = suggest_schema_columns(&schema, &matcher, threshold);
    tracing::debug!(
        "Matched {} of {} column fields for '{}'",
        matches.values().filter(|found| found.is_some()).count(),
        matches.len(),
        args.data_type
    );

    let fields: Vec<FieldMatchInfo> = matches
        .into_iter()
        .map(|(key, found)| {
            let expected = schema.get(&key).and_then(|v| v.as_text()).unwrap_or_default();
            FieldMatchInfo {
                suggestions: matcher.suggestions(expected, suggestion_count),
                expected: expected.to_string(),
                column: found.as_ref().map(|m| m.column.clone()),
                score: found.map(|m| m.score),
                key,
            }
        })
        .collect();

    let mut applied = false;
    if args.apply {
        let updates: Vec<(&str, &str)> = fields
            .iter()
            .filter_map(|field| Some((field.key.as_str(), field.column.as_deref()?)))
            .collect();
        state.update_values(&args.data_type, updates)?;
        applied = commit_state(workspace, &state, output, dry_run)?;
        if dry_run {
            return Ok(());
        }
    }

    if output.is_json() {
        return output.result(MatchOutput {
            data_type: args.data_type,
            threshold,
            applied,
            fields,
        });
    }

    #[derive(Tabled, Serialize)]
    struct MatchRow {
        #[tabled(rename = "Field")]
        key: String,
        #[tabled(rename = "Expected")]
        expected: String,
        #[tabled(rename = "Match")]
        column: String,
        #[tabled(rename = "Score")]
        score: String,
        #[tabled(rename = "Suggestions")]
        suggestions: String,
    }

    let matched = fields.iter().filter(|field| field.column.is_some()).count();
    let total = fields.len();

    let rows: Vec<MatchRow> = fields
        .into_iter()
        .map(|field| MatchRow {
            key: field.key,
            expected: field.expected,
            column: field.column.unwrap_or_else(|| "-".to_string()),
            score: field.score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".to_string()),
            suggestions: field
                .suggestions
                .iter()
                .map(|(column, score)| format!("{} ({:.2})", column, score))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    output.section(format!("Column matches for {} (threshold {})", args.data_type, threshold));
    output.table(rows)?;

    if applied {
        output.success(format!("Stored {} matched columns", matched));
    } else if matched < total {
        output.warning(format!("{} of {} column fields have no match", total - matched, total));
    }

    Ok(())
}
