use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use ntgs_core::conversion::{FieldKind, FormField};
use ntgs_core::matching::ColumnMatcher;

const NO_COLUMN: &str = "(none)";

/// Walk through the fields of a data type.
///
/// Column fields offer the matcher's columns when there are any; everything
/// else is edited as text. Returns the fields whose text changed, or `None`
/// if the user declined to save.
pub fn prompt_form(
    data_type: &str,
    fields: &[FormField],
    matcher: &ColumnMatcher,
    threshold: f64,
) -> Result<Option<Vec<(String, String)>>> {
    println!("\n📝 Editing {}\n", data_type);

    let columns: Vec<&str> = matcher.columns().collect();
    let mut edits = Vec::new();

    for field in fields {
        let text = if field.kind == FieldKind::Column && !columns.is_empty() {
            select_column(field, &columns, matcher, threshold)?
        } else {
            Input::<String>::new()
                .with_prompt(&field.label)
                .with_initial_text(field.text.clone())
                .allow_empty(true)
                .interact_text()?
        };

        if text != field.text {
            edits.push((field.key.clone(), text));
        }
    }

    // Confirmation
    println!("\n📋 Changes\n");
    if edits.is_empty() {
        println!("  (none)");
    }
    for (key, text) in &edits {
        println!("  {:<28} {}", key, text);
    }
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Save changes to {}?", data_type))
        .default(true)
        .interact()?;

    Ok(confirmed.then_some(edits))
}

fn select_column(
    field: &FormField,
    columns: &[&str],
    matcher: &ColumnMatcher,
    threshold: f64,
) -> Result<String> {
    let mut items: Vec<&str> = columns.to_vec();
    items.push(NO_COLUMN);

    // Current value if it is a known column, else the best match for it
    let default = columns
        .iter()
        .position(|column| *column == field.text)
        .or_else(|| {
            let found = matcher.find_match(&field.text, threshold)?;
            columns.iter().position(|column| *column == found.column)
        })
        .unwrap_or(columns.len());

    let choice = Select::new()
        .with_prompt(format!("{} (was {:?})", field.label, field.text))
        .items(&items)
        .default(default)
        .interact()?;

    Ok(match items[choice] {
        NO_COLUMN => String::new(),
        column => column.to_string(),
    })
}
