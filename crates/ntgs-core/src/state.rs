//! Mutable configuration for one editing session

use crate::coercion::coerce;
use crate::error::{NtgsError, Result};
use crate::models::{ConfigSnapshot, FieldSchema, FieldValue};
use crate::registry::TemplateRegistry;

/// Per-session copy of the field schemas.
///
/// Every write is coerced into the shape of the value already stored for
/// that field. Every read hands out an owned copy, so callers can never alias
/// the stored schemas.
///
/// There is no internal locking; share across threads behind a mutex.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationState {
    config: ConfigSnapshot,
}

impl ConfigurationState {
    /// Create a state from a saved snapshot, or from the built-in NTGS
    /// templates when `base_config` is `None`.
    pub fn new(base_config: Option<&ConfigSnapshot>) -> Self {
        match base_config {
            Some(snapshot) => Self { config: snapshot.clone() },
            None => Self::from_registry(&TemplateRegistry::ntgs()),
        }
    }

    /// Create a state seeded from the given registry's templates
    pub fn from_registry(registry: &TemplateRegistry) -> Self {
        Self { config: registry.export() }
    }

    /// Data types known to this state, in definition order
    pub fn data_types(&self) -> Vec<String> {
        self.config.keys().cloned().collect()
    }

    pub fn contains(&self, data_type: &str) -> bool {
        self.config.contains_key(data_type)
    }

    /// Copy of the field schema for a data type
    pub fn schema(&self, data_type: &str) -> Result<FieldSchema> {
        self.fields(data_type).cloned()
    }

    /// Current value of a field.
    ///
    /// Keys missing from a known data type read as [`FieldValue::Null`].
    pub fn value(&self, data_type: &str, key: &str) -> Result<FieldValue> {
        Ok(self.fields(data_type)?.get(key).cloned().unwrap_or_default())
    }

    /// Coerce `value` into the field's current shape and store it.
    ///
    /// Unknown keys are created; they have no shape yet so the value is
    /// stored unchanged.
    pub fn set_value(
        &mut self,
        data_type: &str,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        let fields = self.fields_mut(data_type)?;
        store(fields, key, value.into());
        Ok(())
    }

    /// Apply several edits to one data type, in iteration order.
    ///
    /// The data type is validated before anything is written, so an unknown
    /// data type leaves the state untouched.
    pub fn update_values<I, K, V>(&mut self, data_type: &str, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let fields = self.fields_mut(data_type)?;
        for (key, value) in updates {
            store(fields, key.as_ref(), value.into());
        }
        Ok(())
    }

    /// Replace one data type's fields with the registry defaults
    pub fn restore_defaults(&mut self, registry: &TemplateRegistry, data_type: &str) -> Result<()> {
        let defaults = registry.lookup(data_type)?;
        *self.fields_mut(data_type)? = defaults;
        tracing::debug!("Restored defaults for '{}'", data_type);
        Ok(())
    }

    /// Deep copy of the whole state
    pub fn export(&self) -> ConfigSnapshot {
        self.config.clone()
    }

    fn fields(&self, data_type: &str) -> Result<&FieldSchema> {
        self.config
            .get(data_type)
            .ok_or_else(|| NtgsError::unknown_data_type(data_type))
    }

    fn fields_mut(&mut self, data_type: &str) -> Result<&mut FieldSchema> {
        self.config
            .get_mut(data_type)
            .ok_or_else(|| NtgsError::unknown_data_type(data_type))
    }
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self::new(None)
    }
}

fn store(fields: &mut FieldSchema, key: &str, value: FieldValue) {
    let coerced = match fields.get(key) {
        Some(template) => coerce(template, value),
        None => value,
    };
    tracing::trace!("Storing {} = {:?}", key, coerced);
    fields.insert(key.to_string(), coerced);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_default_state_matches_registry() {
        let state = ConfigurationState::default();
        assert_eq!(state.export(), TemplateRegistry::ntgs().export());
        assert_eq!(state.data_types(), vec!["geology", "structure", "fault", "fold"]);
    }

    #[test]
    fn test_value_for_missing_key_is_null() {
        let state = ConfigurationState::default();
        assert_eq!(state.value("geology", "no_such_field").unwrap(), FieldValue::Null);
        assert!(state.value("nope", "unitname_column").is_err());
    }

    #[test]
    fn test_set_value_creates_missing_key_unchanged() {
        let mut state = ConfigurationState::default();
        state.set_value("fold", "extra", 12).unwrap();
        assert_eq!(state.value("fold", "extra").unwrap(), FieldValue::Integer(12));

        // The new key now has an integer shape
        state.set_value("fold", "extra", "not a number").unwrap();
        assert_eq!(state.value("fold", "extra").unwrap(), FieldValue::Integer(12));
    }

    #[test]
    fn test_schema_copy_is_detached() {
        let state = ConfigurationState::default();
        let mut schema = state.schema("structure").unwrap();
        schema.insert("dip_column".to_string(), FieldValue::from("Changed"));
        assert_eq!(state.value("structure", "dip_column").unwrap(), FieldValue::from("Dip"));
    }

    #[test]
    fn test_update_values_uses_previous_entry_as_template() {
        let mut state = ConfigurationState::new(Some(&IndexMap::from([(
            "custom".to_string(),
            FieldSchema::new(),
        )])));

        let updates = [("n", FieldValue::Integer(1)), ("n", FieldValue::from("x"))];
        state.update_values("custom", updates).unwrap();
        assert_eq!(state.value("custom", "n").unwrap(), FieldValue::Integer(1));
    }

    #[test]
    fn test_restore_defaults() {
        let registry = TemplateRegistry::ntgs();
        let mut state = ConfigurationState::from_registry(&registry);
        state.set_value("fault", "dip_column", "DIP_DEG").unwrap();
        state.set_value("fault", "extra", "x").unwrap();

        state.restore_defaults(&registry, "fault").unwrap();
        assert_eq!(state.schema("fault").unwrap(), registry.lookup("fault").unwrap());
    }

    #[test]
    fn test_restore_defaults_unknown_to_registry() {
        let registry = TemplateRegistry::ntgs();
        let mut snapshot = registry.export();
        snapshot.insert("survey".to_string(), FieldSchema::new());
        let mut state = ConfigurationState::new(Some(&snapshot));

        assert!(matches!(
            state.restore_defaults(&registry, "survey"),
            Err(NtgsError::UnknownDataType { .. })
        ));
        assert!(state.contains("survey"));
    }
}
