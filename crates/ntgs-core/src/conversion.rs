//! Hand-off between the configuration editor and the conversion pipeline
//!
//! A conversion runs either automatically, with one of the converters the
//! backend offers, or manually, with a source layer and a field mapping per
//! data type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::{ConfigSnapshot, FieldValue};
use crate::state::ConfigurationState;

/// Source layer chosen for a data type
pub type LayerSelections = IndexMap<String, Option<LayerSelection>>;

/// An available converter implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterOption {
    #[serde(rename = "id")]
    pub identifier: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl ConverterOption {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), label: label.into(), description: String::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Build converter options from loosely shaped backend descriptions.
///
/// Objects take their identifier from the first non-empty of `id`,
/// `identifier`, `name` or `label`; anything else is used as both identifier
/// and label.
pub fn normalise_converters<I>(converters: I) -> Vec<ConverterOption>
where
    I: IntoIterator<Item = Value>,
{
    converters
        .into_iter()
        .map(|raw| match raw {
            Value::Object(map) => {
                let pick = |keys: &[&str]| {
                    keys.iter().filter_map(|key| map.get(*key)).find(|v| is_truthy(v)).map(text_of)
                };
                let identifier = pick(&["id", "identifier", "name", "label"])
                    .unwrap_or_else(|| "converter".to_string());
                let label = pick(&["label", "name"]).unwrap_or_else(|| identifier.clone());
                let description = pick(&["description"]).unwrap_or_default();
                ConverterOption { identifier, label, description }
            }
            other => {
                let text = text_of(&other);
                ConverterOption::new(text.clone(), text)
            }
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A source layer in the host project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSelection {
    pub layer_id: String,
    pub layer_name: String,
}

impl LayerSelection {
    pub fn new(layer_id: impl Into<String>, layer_name: impl Into<String>) -> Self {
        Self { layer_id: layer_id.into(), layer_name: layer_name.into() }
    }
}

/// An empty layer selection for every data type of a state
pub fn empty_layer_selections(state: &ConfigurationState) -> LayerSelections {
    state.data_types().into_iter().map(|data_type| (data_type, None)).collect()
}

/// What the conversion pipeline receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ActiveConfiguration {
    Automatic {
        converter: Option<ConverterOption>,
    },
    Manual {
        layers: LayerSelections,
        config_map: ConfigSnapshot,
    },
}

impl ActiveConfiguration {
    pub fn automatic(converter: Option<ConverterOption>) -> Self {
        ActiveConfiguration::Automatic { converter }
    }

    /// Manual hand-off: one layer entry per data type of `state`, plus a
    /// snapshot of its fields. Selections for unknown data types are dropped.
    pub fn manual(state: &ConfigurationState, layers: &LayerSelections) -> Self {
        let layers = state
            .data_types()
            .into_iter()
            .map(|data_type| {
                let selection = layers.get(&data_type).cloned().flatten();
                (data_type, selection)
            })
            .collect();

        ActiveConfiguration::Manual { layers, config_map: state.export() }
    }
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Pick a column of the source layer
    Column,
    /// Single-line text; lists are comma separated
    Text,
}

/// One editable field of a data type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub text: String,
    pub value: FieldValue,
}

/// Editable fields of a data type, in schema order
pub fn form_fields(state: &ConfigurationState, data_type: &str) -> Result<Vec<FormField>> {
    let schema = state.schema(data_type)?;

    Ok(schema
        .into_iter()
        .map(|(key, value)| {
            let kind = if key.ends_with("_column") { FieldKind::Column } else { FieldKind::Text };
            FormField {
                label: format_label(&key),
                text: value.display_text(),
                key,
                kind,
                value,
            }
        })
        .collect())
}

/// `axial_plane_dip_column` becomes `Axial Plane Dip Column`
pub fn format_label(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalise_converters() {
        let options = normalise_converters(vec![
            json!({"name": "ntgs", "description": "NTGS converter"}),
            json!({"id": "", "identifier": "gsq", "label": "GSQ"}),
            json!({"description": null}),
            json!("plain"),
            json!(3),
        ]);

        assert_eq!(options[0], ConverterOption::new("ntgs", "ntgs").with_description("NTGS converter"));
        assert_eq!(options[1], ConverterOption::new("gsq", "GSQ"));
        assert_eq!(options[2], ConverterOption::new("converter", "converter"));
        assert_eq!(options[3], ConverterOption::new("plain", "plain"));
        assert_eq!(options[4], ConverterOption::new("3", "3"));
    }

    #[test]
    fn test_converter_serialization() {
        let option = ConverterOption::new("ntgs", "NTGS");
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value, json!({"id": "ntgs", "label": "NTGS", "description": ""}));
    }

    #[test]
    fn test_automatic_configuration() {
        let active = ActiveConfiguration::automatic(None);
        assert_eq!(
            serde_json::to_value(&active).unwrap(),
            json!({"mode": "automatic", "converter": null})
        );
    }

    #[test]
    fn test_manual_configuration_covers_every_data_type() {
        let state = ConfigurationState::default();
        let mut layers = empty_layer_selections(&state);
        layers.insert("fault".to_string(), Some(LayerSelection::new("faults_1a2b", "Faults")));
        layers.insert("bogus".to_string(), Some(LayerSelection::new("x", "x")));

        let active = ActiveConfiguration::manual(&state, &layers);
        let ActiveConfiguration::Manual { layers, config_map } = &active else {
            panic!("expected manual configuration");
        };

        let keys: Vec<&str> = layers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["geology", "structure", "fault", "fold"]);
        assert_eq!(layers["fault"].as_ref().unwrap().layer_name, "Faults");
        assert!(layers["geology"].is_none());
        assert_eq!(config_map, &state.export());

        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(json["mode"], "manual");
        assert_eq!(json["config_map"]["geology"]["ignore_lithology_codes"], json!(["cover", "Unknown"]));
    }

    #[test]
    fn test_form_fields() {
        let state = ConfigurationState::default();
        let fields = form_fields(&state, "geology").unwrap();

        assert_eq!(fields.len(), 14);
        assert_eq!(fields[0].key, "unitname_column");
        assert_eq!(fields[0].label, "Unitname Column");
        assert_eq!(fields[0].kind, FieldKind::Column);

        let codes = fields.iter().find(|f| f.key == "ignore_lithology_codes").unwrap();
        assert_eq!(codes.kind, FieldKind::Text);
        assert_eq!(codes.text, "cover, Unknown");

        assert!(form_fields(&state, "missing").is_err());
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("axial_plane_dip_column"), "Axial Plane Dip Column");
        assert_eq!(format_label("OBJECTID"), "Objectid");
        assert_eq!(format_label("__x"), "X");
    }
}
