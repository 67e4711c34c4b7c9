use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ntgs_core::conversion::{FormField, LayerSelection};
use ntgs_core::models::{FieldShape, FieldValue};
use serde::Serialize;

/// Output for init command
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub workspace_path: String,
    pub session_path: String,
    pub seeded_from: Option<String>,
    pub data_types: Vec<String>,
}

/// Output for types command
#[derive(Debug, Serialize)]
pub struct TypesOutput {
    pub data_types: Vec<DataTypeInfo>,
}

#[derive(Debug, Serialize)]
pub struct DataTypeInfo {
    pub name: String,
    pub field_count: usize,
    pub layer: Option<LayerSelection>,
}

/// Output for show command
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub data_type: String,
    pub source: &'static str,
    pub fields: Vec<FormField>,
}

/// Output for get command
#[derive(Debug, Serialize)]
pub struct ValueOutput {
    pub data_type: String,
    pub key: String,
    pub shape: FieldShape,
    pub value: FieldValue,
}

/// Output for set and update commands
#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    pub data_type: String,
    pub stored: IndexMap<String, FieldValue>,
}

/// Output for match command
#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub data_type: String,
    pub threshold: f64,
    pub applied: bool,
    pub fields: Vec<FieldMatchInfo>,
}

#[derive(Debug, Serialize)]
pub struct FieldMatchInfo {
    pub key: String,
    pub expected: String,
    pub column: Option<String>,
    pub score: Option<f64>,
    pub suggestions: Vec<(String, f64)>,
}

/// Output for layer command
#[derive(Debug, Serialize)]
pub struct LayerOutput {
    pub data_type: String,
    pub layer: Option<LayerSelection>,
}

/// Output for reset command
#[derive(Debug, Serialize)]
pub struct ResetOutput {
    pub data_types: Vec<String>,
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub workspace_path: String,
    pub session_path: String,
    pub saved_at: DateTime<Utc>,
    pub data_types: Vec<String>,
    pub selected_layers: usize,
    pub settings: Vec<SettingInfo>,
}

#[derive(Debug, Serialize, tabled::Tabled)]
pub struct SettingInfo {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
