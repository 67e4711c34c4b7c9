use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FieldValue;
use crate::error::NtgsError;

/// Field key to value, in definition order
pub type FieldSchema = IndexMap<String, FieldValue>;

/// Data type name to field schema, in definition order
pub type ConfigSnapshot = IndexMap<String, FieldSchema>;

/// Built-in NTGS data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Geology,
    Structure,
    Fault,
    Fold,
}

impl DataType {
    /// All built-in data types in registry order
    pub const ALL: [DataType; 4] =
        [DataType::Geology, DataType::Structure, DataType::Fault, DataType::Fold];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Geology => "geology",
            DataType::Structure => "structure",
            DataType::Fault => "fault",
            DataType::Fold => "fold",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = NtgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| NtgsError::unknown_data_type(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_type() {
        assert_eq!("fault".parse::<DataType>().unwrap(), DataType::Fault);
        assert!(matches!(
            "Fault".parse::<DataType>(),
            Err(NtgsError::UnknownDataType { .. })
        ));
    }

    #[test]
    fn test_data_type_order() {
        let names: Vec<&str> = DataType::ALL.iter().map(DataType::as_str).collect();
        assert_eq!(names, vec!["geology", "structure", "fault", "fold"]);
    }
}
