//! Built-in NTGS configuration templates
//!
//! The registry is a plain value: construct it where it is needed and pass it
//! to [`ConfigurationState::from_registry`](crate::state::ConfigurationState::from_registry).
//! Nothing is shared between instances and nothing can mutate one after
//! construction.

use crate::error::{NtgsError, Result};
use crate::models::{ConfigSnapshot, DataType, FieldSchema, FieldValue};

/// Read-only table of default field schemas per data type
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegistry {
    templates: ConfigSnapshot,
}

impl TemplateRegistry {
    /// The built-in NTGS defaults
    pub fn ntgs() -> Self {
        let templates = DataType::ALL
            .into_iter()
            .map(|data_type| (data_type.as_str().to_string(), default_schema(data_type)))
            .collect();

        Self { templates }
    }

    /// Registered data type names in definition order
    pub fn data_types(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn contains(&self, data_type: &str) -> bool {
        self.templates.contains_key(data_type)
    }

    /// Default field schema for a data type
    pub fn lookup(&self, data_type: &str) -> Result<FieldSchema> {
        self.templates
            .get(data_type)
            .cloned()
            .ok_or_else(|| NtgsError::unknown_data_type(data_type))
    }

    /// Deep copy of every template
    pub fn export(&self) -> ConfigSnapshot {
        self.templates.clone()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::ntgs()
    }
}

fn default_schema(data_type: DataType) -> FieldSchema {
    match data_type {
        DataType::Geology => {
            let mut schema = text_fields(&[
                ("unitname_column", "Formation"),
                ("alt_unitname_column", "Formation"),
                ("group_column", "Group"),
                ("supergroup_column", "Supergroup"),
                ("description_column", "LithDescn1"),
                ("minage_column", "AgeMin"),
                ("maxage_column", "AgeMax"),
                ("rocktype_column", "LithClass"),
                ("alt_rocktype_column", "RockCat"),
                ("sill_text", "RockCat"),
                ("intrusive_text", "RockCat"),
                ("volcanic_text", "RockCat"),
                ("objectid_column", "OBJECTID"),
            ]);
            schema.insert(
                "ignore_lithology_codes".to_string(),
                FieldValue::from(vec!["cover", "Unknown"]),
            );
            schema
        }
        DataType::Structure => text_fields(&[
            ("orientation_type", "dip direction"),
            ("dipdir_column", "DipDir"),
            ("dip_column", "Dip"),
            ("description_column", "FeatDesc"),
            ("bedding_text", "ObsType"),
            ("overturned_column", "Desc"),
            ("overturned_text", "overturned"),
            ("objectid_column", "OBJECTID"),
        ]),
        DataType::Fault => text_fields(&[
            ("orientation_type", "dip direction"),
            ("structtype_column", "FaultType"),
            (
                "fault_text",
                "'Thrust','Reverse','Normal','Shear zone','Strike-slip','Thrust','Unknown'",
            ),
            ("dip_null_value", "-999"),
            ("dipdir_flag", "num"),
            ("dipdir_column", "DipDir"),
            ("dip_column", "Dip"),
            ("dipestimate_column", "DipEstimate"),
            (
                "dipestimate_text",
                "'NORTH_EAST','NORTH',<rest of cardinals>,'NOT ACCESSED'",
            ),
            ("displacement_column", "Displace"),
            ("displacement_text", "'1m-100m', '100m-1km', '1km-5km', '>5km'"),
            ("fault_length_column", "FaultLen"),
            (
                "fault_length_text",
                "Small (0-5km),Medium (5-30km),Large (30-100km),Regional (>100km),Unclassified",
            ),
            ("name_column", "FaultName"),
            ("objectid_column", "OBJECTID"),
        ]),
        DataType::Fold => text_fields(&[
            ("structtype_column", "FoldType"),
            (
                "fold_text",
                "'Anticline','Syncline','Antiform','Synform','Monocline','Monoform','Neutral','Fold axis','Overturned syncline'",
            ),
            ("description_column", "Desc"),
            ("synform_text", "FoldType"),
            ("foldname_column", "FoldName"),
            ("objectid_column", "OBJECTID"),
            ("tightness_column", "IntlimbAng"),
            ("axial_plane_dipdir_column", "AxPlDipDir"),
            ("axial_plane_dip_column", "AxPlDip"),
        ]),
    }
}

fn text_fields(entries: &[(&str, &str)]) -> FieldSchema {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), FieldValue::from(*value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_data_types() {
        let registry = TemplateRegistry::ntgs();
        let names: Vec<&str> = registry.data_types().collect();
        assert_eq!(names, vec!["geology", "structure", "fault", "fold"]);
    }

    #[test]
    fn test_lookup_defaults() {
        let registry = TemplateRegistry::default();

        let geology = registry.lookup("geology").unwrap();
        assert_eq!(geology.len(), 14);
        assert_eq!(geology["unitname_column"], FieldValue::from("Formation"));
        assert_eq!(
            geology["ignore_lithology_codes"],
            FieldValue::from(vec!["cover", "Unknown"])
        );

        let fault = registry.lookup("fault").unwrap();
        assert_eq!(fault["dip_null_value"], FieldValue::from("-999"));
        assert_eq!(fault.get_index(0).map(|(key, _)| key.as_str()), Some("orientation_type"));

        assert_eq!(registry.lookup("structure").unwrap().len(), 8);
        assert_eq!(registry.lookup("fold").unwrap().len(), 9);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = TemplateRegistry::ntgs();
        let err = registry.lookup("basement").unwrap_err();
        assert!(matches!(err, NtgsError::UnknownDataType { ref data_type } if data_type == "basement"));
    }

    #[test]
    fn test_export_is_independent() {
        let registry = TemplateRegistry::ntgs();

        let mut exported = registry.export();
        exported["geology"].insert("unitname_column".to_string(), FieldValue::from("Custom"));
        exported.shift_remove("fold");

        assert_eq!(
            registry.lookup("geology").unwrap()["unitname_column"],
            FieldValue::from("Formation")
        );
        assert!(registry.contains("fold"));
        assert_eq!(registry.export(), TemplateRegistry::ntgs().export());
    }
}
