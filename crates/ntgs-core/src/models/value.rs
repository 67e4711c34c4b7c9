use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NtgsError, Result};

/// A single configuration value.
///
/// The variant a field holds is its shape. Serialized untagged so that a
/// snapshot reads as plain JSON (`"Dip"`, `42`, `0.5`, `["cover"]`, `null`)
/// while integer and float shapes survive a round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicitly unset; accepts any later value as-is
    #[default]
    Null,

    /// Whole number
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// Free text or a column name
    Text(String),

    /// Ordered list of strings, e.g. codes to ignore
    List(Vec<String>),
}

/// Shape tag of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    Null,
    Integer,
    Float,
    Text,
    List,
}

impl FieldValue {
    /// Returns the shape tag of this value
    pub fn shape(&self) -> FieldShape {
        match self {
            FieldValue::Null => FieldShape::Null,
            FieldValue::Integer(_) => FieldShape::Integer,
            FieldValue::Float(_) => FieldShape::Float,
            FieldValue::Text(_) => FieldShape::Text,
            FieldValue::List(_) => FieldShape::List,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// String representation used when a value is stored into a text field
    /// or shown in a single-line input.
    ///
    /// Lists are joined with `", "` so the result can be split back on commas.
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Float(value) => format_float(*value),
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldShape::Null => "null",
            FieldShape::Integer => "integer",
            FieldShape::Float => "float",
            FieldShape::Text => "text",
            FieldShape::List => "list",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Shortest round-trip text for a float.
///
/// Decimal notation for exponents in `-4..16`, with a trailing `.0` on
/// integral values; scientific notation with a signed two-digit exponent
/// otherwise (`1e+16`, `1e-05`). Non-finite values are `nan`, `inf`, `-inf`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let decimal = value.to_string();
    if decimal.contains('.') {
        decimal
    } else {
        format!("{}.0", decimal)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for FieldValue {
    type Error = NtgsError;

    /// Convert a JSON literal into a field value.
    ///
    /// Booleans become text, array elements are stringified, objects are
    /// rejected since no field holds nested mappings.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(flag) => Ok(FieldValue::Text(flag.to_string())),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Ok(FieldValue::Integer(integer)),
                None => number.as_f64().map(FieldValue::Float).ok_or_else(|| {
                    NtgsError::Serialization(format!("Unrepresentable number: {}", number))
                }),
            },
            Value::String(text) => Ok(FieldValue::Text(text)),
            Value::Array(items) => Ok(FieldValue::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(text) => text,
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Object(_) => Err(NtgsError::Serialization(
                "Objects are not valid field values".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_tags() {
        assert_eq!(FieldValue::Null.shape(), FieldShape::Null);
        assert_eq!(FieldValue::from(3).shape(), FieldShape::Integer);
        assert_eq!(FieldValue::from(0.5).shape(), FieldShape::Float);
        assert_eq!(FieldValue::from("Dip").shape(), FieldShape::Text);
        assert_eq!(FieldValue::from(vec!["a"]).shape(), FieldShape::List);
        assert_eq!(FieldShape::Integer.to_string(), "integer");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(FieldValue::Null.display_text(), "");
        assert_eq!(FieldValue::Integer(-123).display_text(), "-123");
        assert_eq!(FieldValue::Float(2.0).display_text(), "2.0");
        assert_eq!(FieldValue::Float(0.25).display_text(), "0.25");
        assert_eq!(FieldValue::from(vec!["cover", "Unknown"]).display_text(), "cover, Unknown");
    }

    #[test]
    fn test_float_text_switches_to_exponent_outside_decimal_range() {
        let cases = [
            (0.0001, "0.0001"),
            (1e-5, "1e-05"),
            (-2.5e-7, "-2.5e-07"),
            (123456789.0, "123456789.0"),
            (1e15, "1000000000000000.0"),
            (1e16, "1e+16"),
            (1.5e300, "1.5e+300"),
            (0.0, "0.0"),
            (-0.0, "-0.0"),
            (f64::NAN, "nan"),
            (f64::INFINITY, "inf"),
            (f64::NEG_INFINITY, "-inf"),
        ];
        for (value, expected) in cases {
            assert_eq!(FieldValue::Float(value).display_text(), expected, "{:?}", value);
        }
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(7)), FieldValue::Integer(7));
    }

    #[test]
    fn test_json_serialization_is_untagged() {
        let values = vec![
            FieldValue::Null,
            FieldValue::Integer(42),
            FieldValue::Float(1.5),
            FieldValue::from("Formation"),
            FieldValue::from(vec!["cover"]),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,42,1.5,"Formation",["cover"]]"#);
    }

    #[test]
    fn test_integral_float_keeps_shape_through_json() {
        let json = serde_json::to_string(&FieldValue::Float(3.0)).unwrap();
        let restored: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, FieldValue::Float(3.0));

        let restored: FieldValue = serde_json::from_str("3").unwrap();
        assert_eq!(restored, FieldValue::Integer(3));
    }

    #[test]
    fn test_from_json_literal() {
        let value = FieldValue::try_from(serde_json::json!(["a", 1, true])).unwrap();
        assert_eq!(value, FieldValue::from(vec!["a", "1", "true"]));

        let value = FieldValue::try_from(serde_json::json!(-1.5)).unwrap();
        assert_eq!(value, FieldValue::Float(-1.5));

        assert!(FieldValue::try_from(serde_json::json!({"nested": 1})).is_err());
    }
}
