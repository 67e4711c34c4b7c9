//! Integration tests for the configuration state
//!
//! These cover the editing contract the conversion UI relies on: copy-out
//! isolation, shape-preserving edits, and strict data type validation.

use indexmap::IndexMap;
use ntgs_core::{ConfigurationState, FieldValue, NtgsError, TemplateRegistry};

#[test]
fn test_export_returns_deep_copy() {
    let base = TemplateRegistry::ntgs().export();
    let state = ConfigurationState::new(Some(&base));

    let mut exported = state.export();
    exported["geology"].insert("unitname_column".to_string(), FieldValue::from("CustomFormation"));
    if let Some(FieldValue::List(codes)) = exported["geology"].get_mut("ignore_lithology_codes") {
        codes.push("water".to_string());
    }

    assert_eq!(
        state.value("geology", "unitname_column").unwrap(),
        base["geology"]["unitname_column"]
    );
    assert_eq!(
        state.value("geology", "ignore_lithology_codes").unwrap(),
        FieldValue::from(vec!["cover", "Unknown"])
    );
}

#[test]
fn test_constructor_copies_base_config() {
    let mut base = TemplateRegistry::ntgs().export();
    let state = ConfigurationState::new(Some(&base));

    base["fault"].insert("dip_column".to_string(), FieldValue::from("Changed"));
    assert_eq!(state.value("fault", "dip_column").unwrap(), FieldValue::from("Dip"));
}

#[test]
fn test_set_value_coerces_lists() {
    let mut state = ConfigurationState::default();
    state.set_value("geology", "ignore_lithology_codes", "cover, Unknown , ,").unwrap();

    assert_eq!(
        state.value("geology", "ignore_lithology_codes").unwrap(),
        FieldValue::from(vec!["cover", "Unknown"])
    );
}

#[test]
fn test_update_values_casts_to_string() {
    let mut state = ConfigurationState::default();
    state.update_values("fault", [("dip_null_value", -123)]).unwrap();

    assert_eq!(state.value("fault", "dip_null_value").unwrap(), FieldValue::from("-123"));
}

#[test]
fn test_unknown_data_type_raises() {
    let mut state = ConfigurationState::default();
    let before = state.export();

    let err = state.set_value("unknown", "some_field", "value").unwrap_err();
    assert!(matches!(err, NtgsError::UnknownDataType { ref data_type } if data_type == "unknown"));
    assert!(matches!(state.schema("unknown"), Err(NtgsError::UnknownDataType { .. })));
    assert!(matches!(state.value("unknown", "x"), Err(NtgsError::UnknownDataType { .. })));

    assert_eq!(state.export(), before);
}

#[test]
fn test_repeated_export_is_equal_and_independent() {
    let state = ConfigurationState::default();

    let first = state.export();
    let mut second = state.export();
    assert_eq!(first, second);

    second["fold"].clear();
    assert_ne!(first, second);
    assert_eq!(state.export(), first);
}

#[test]
fn test_invalid_numeric_input_is_ignored() {
    let mut base = IndexMap::new();
    base.insert(
        "fault".to_string(),
        IndexMap::from([
            ("min_length".to_string(), FieldValue::Integer(42)),
            ("weight".to_string(), FieldValue::Float(0.5)),
        ]),
    );
    let mut state = ConfigurationState::new(Some(&base));

    state.set_value("fault", "min_length", "abc").unwrap();
    assert_eq!(state.value("fault", "min_length").unwrap(), FieldValue::Integer(42));

    state.set_value("fault", "min_length", "100").unwrap();
    assert_eq!(state.value("fault", "min_length").unwrap(), FieldValue::Integer(100));

    state.set_value("fault", "weight", "1e-3").unwrap();
    assert_eq!(state.value("fault", "weight").unwrap(), FieldValue::Float(0.001));
}

#[test]
fn test_bulk_update_unknown_type_writes_nothing() {
    let mut state = ConfigurationState::default();
    let before = state.export();

    let result = state.update_values("unknown", [("a", 1), ("b", 2)]);
    assert!(matches!(result, Err(NtgsError::UnknownDataType { .. })));
    assert_eq!(state.export(), before);
    for data_type in state.data_types() {
        assert_eq!(state.value(&data_type, "a").unwrap(), FieldValue::Null);
    }
}

#[test]
fn test_bulk_update_applies_in_order() {
    let mut state = ConfigurationState::default();

    let mut updates: IndexMap<String, FieldValue> = IndexMap::new();
    updates.insert("dip_column".to_string(), FieldValue::from("DIP"));
    updates.insert("dipdir_column".to_string(), FieldValue::Null);
    updates.insert("new_field".to_string(), FieldValue::from(vec!["a", "b"]));

    state.update_values("structure", updates).unwrap();

    assert_eq!(state.value("structure", "dip_column").unwrap(), FieldValue::from("DIP"));
    assert_eq!(state.value("structure", "dipdir_column").unwrap(), FieldValue::from(""));
    assert_eq!(state.value("structure", "new_field").unwrap(), FieldValue::from(vec!["a", "b"]));

    let schema = state.schema("structure").unwrap();
    assert_eq!(schema.keys().last().map(String::as_str), Some("new_field"));
}

#[test]
fn test_data_types_follow_snapshot_order() {
    let mut base = IndexMap::new();
    base.insert("fold".to_string(), IndexMap::new());
    base.insert("geology".to_string(), IndexMap::new());

    let state = ConfigurationState::new(Some(&base));
    assert_eq!(state.data_types(), vec!["fold", "geology"]);
    assert!(state.schema("fault").is_err());
}
