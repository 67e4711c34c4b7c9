//! Saving and restoring configuration sessions
//!
//! A session file is JSON holding an exported snapshot plus the layer chosen
//! for each data type. Restoring builds a fresh [`ConfigurationState`] from
//! the saved snapshot.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::conversion::{empty_layer_selections, LayerSelections};
use crate::error::{NtgsError, Result};
use crate::models::{ConfigSnapshot, FieldSchema, FieldValue};
use crate::state::ConfigurationState;

/// Current session file format
pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub config: ConfigSnapshot,
    #[serde(default)]
    pub layers: LayerSelections,
}

impl SessionFile {
    /// Capture a state and its layer selections
    pub fn from_state(state: &ConfigurationState, layers: LayerSelections) -> Self {
        Self { version: SESSION_VERSION, saved_at: Utc::now(), config: state.export(), layers }
    }

    /// A new session seeded from a state, with no layers selected
    pub fn new(state: &ConfigurationState) -> Self {
        Self::from_state(state, empty_layer_selections(state))
    }

    /// Rebuild the configuration state
    pub fn state(&self) -> ConfigurationState {
        ConfigurationState::new(Some(&self.config))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NtgsError::Serialization(e.to_string()))?;
        fs::write(path.as_ref(), json)?;
        tracing::debug!("Saved session to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let session: SessionFile =
            serde_json::from_str(&content).map_err(|e| NtgsError::ConfigInvalid {
                key: "session".to_string(),
                reason: format!("Failed to parse session file: {}", e),
            })?;

        if session.version != SESSION_VERSION {
            return Err(NtgsError::ConfigInvalid {
                key: "version".to_string(),
                reason: format!(
                    "Unsupported session version {} (expected {})",
                    session.version, SESSION_VERSION
                ),
            });
        }

        tracing::debug!(
            "Loaded session from {} ({} data types)",
            path.as_ref().display(),
            session.config.len()
        );
        Ok(session)
    }
}

/// Write a bare snapshot, as produced by `export`
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &ConfigSnapshot, path: P) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshot).map_err(|e| NtgsError::Serialization(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a bare snapshot.
///
/// Field values are read as plain JSON and converted like any other JSON
/// literal, so booleans and non-string list items are accepted as text.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<ConfigSnapshot> {
    let content = fs::read_to_string(path.as_ref())?;
    let raw: IndexMap<String, IndexMap<String, Value>> =
        serde_json::from_str(&content).map_err(|e| NtgsError::ConfigInvalid {
            key: "snapshot".to_string(),
            reason: format!("Failed to parse snapshot: {}", e),
        })?;

    let mut snapshot = ConfigSnapshot::new();
    for (data_type, fields) in raw {
        let mut schema = FieldSchema::new();
        for (key, value) in fields {
            let value = FieldValue::try_from(value).map_err(|e| NtgsError::ConfigInvalid {
                key: format!("{}.{}", data_type, key),
                reason: e.to_string(),
            })?;
            schema.insert(key, value);
        }
        snapshot.insert(data_type, schema);
    }
    Ok(snapshot)
}
