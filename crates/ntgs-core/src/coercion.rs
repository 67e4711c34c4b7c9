//! Shape-preserving coercion of user edits
//!
//! Edits arrive from free-text inputs. The value already stored for a field
//! decides the shape every later value must take.

use crate::models::FieldValue;

/// Coerce `incoming` into the shape of `template`.
///
/// - list templates accept lists verbatim and split text on commas
/// - numeric templates keep their subtype; input that does not convert leaves
///   the template value in place
/// - null templates accept anything unchanged
/// - text templates store the string representation
pub fn coerce(template: &FieldValue, incoming: FieldValue) -> FieldValue {
    match template {
        FieldValue::List(_) => coerce_list(incoming),
        FieldValue::Integer(_) | FieldValue::Float(_) => {
            coerce_numeric(template, &incoming).unwrap_or_else(|| {
                tracing::debug!(
                    "Ignoring non-numeric input '{}' for {} field",
                    incoming,
                    template.shape()
                );
                template.clone()
            })
        }
        FieldValue::Null => incoming,
        FieldValue::Text(_) => match incoming {
            FieldValue::Null => FieldValue::Text(String::new()),
            FieldValue::Text(text) => FieldValue::Text(text),
            other => FieldValue::Text(other.display_text()),
        },
    }
}

/// Split comma separated text into trimmed, non-empty items
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn coerce_list(incoming: FieldValue) -> FieldValue {
    match incoming {
        FieldValue::List(items) => FieldValue::List(items),
        FieldValue::Null => FieldValue::List(Vec::new()),
        FieldValue::Text(text) => FieldValue::List(split_list(&text)),
        other => FieldValue::List(vec![other.display_text()]),
    }
}

fn coerce_numeric(template: &FieldValue, incoming: &FieldValue) -> Option<FieldValue> {
    match template {
        FieldValue::Integer(_) => to_integer(incoming).map(FieldValue::Integer),
        FieldValue::Float(_) => to_float(incoming).map(FieldValue::Float),
        _ => None,
    }
}

fn to_integer(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Integer(integer) => Some(*integer),
        FieldValue::Float(float) => {
            // Truncate toward zero; out of range or non-finite cannot convert
            let truncated = float.trunc();
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64
            {
                Some(truncated as i64)
            } else {
                None
            }
        }
        FieldValue::Text(text) => text.trim().parse::<i64>().ok(),
        FieldValue::Null | FieldValue::List(_) => None,
    }
}

fn to_float(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Integer(integer) => Some(*integer as f64),
        FieldValue::Float(float) => Some(*float),
        FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
        FieldValue::Null | FieldValue::List(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::from(items.to_vec())
    }

    #[test]
    fn test_list_from_comma_text() {
        let template = list(&["cover", "Unknown"]);
        assert_eq!(
            coerce(&template, FieldValue::from("cover, Unknown , ,")),
            list(&["cover", "Unknown"])
        );
        assert_eq!(coerce(&template, FieldValue::from("a,a, b")), list(&["a", "a", "b"]));
    }

    #[test]
    fn test_list_from_empty_inputs() {
        let template = list(&["cover"]);
        assert_eq!(coerce(&template, FieldValue::Null), list(&[]));
        assert_eq!(coerce(&template, FieldValue::from("")), list(&[]));
        assert_eq!(coerce(&template, FieldValue::from("  ,  ")), list(&[]));
    }

    #[test]
    fn test_list_verbatim_and_scalar() {
        let template = list(&[]);
        assert_eq!(coerce(&template, list(&[" x ", ""])), list(&[" x ", ""]));
        assert_eq!(coerce(&template, FieldValue::Integer(5)), list(&["5"]));
        assert_eq!(coerce(&template, FieldValue::Float(2.5)), list(&["2.5"]));
    }

    #[test]
    fn test_integer_template() {
        let template = FieldValue::Integer(42);
        assert_eq!(coerce(&template, FieldValue::from(" 17 ")), FieldValue::Integer(17));
        assert_eq!(coerce(&template, FieldValue::Float(-3.9)), FieldValue::Integer(-3));
        assert_eq!(coerce(&template, FieldValue::from("abc")), FieldValue::Integer(42));
        assert_eq!(coerce(&template, FieldValue::from("3.5")), FieldValue::Integer(42));
        assert_eq!(coerce(&template, FieldValue::Null), FieldValue::Integer(42));
        assert_eq!(coerce(&template, list(&["1"])), FieldValue::Integer(42));
        assert_eq!(coerce(&template, FieldValue::Float(f64::NAN)), FieldValue::Integer(42));
        assert_eq!(coerce(&template, FieldValue::Float(1e300)), FieldValue::Integer(42));
    }

    #[test]
    fn test_float_template() {
        let template = FieldValue::Float(0.5);
        assert_eq!(coerce(&template, FieldValue::from("1.25")), FieldValue::Float(1.25));
        assert_eq!(coerce(&template, FieldValue::Integer(3)), FieldValue::Float(3.0));
        assert_eq!(coerce(&template, FieldValue::from("")), FieldValue::Float(0.5));
        assert_eq!(coerce(&template, FieldValue::from("1,5")), FieldValue::Float(0.5));
    }

    #[test]
    fn test_null_template_accepts_anything() {
        let incoming = list(&["a", "b"]);
        assert_eq!(coerce(&FieldValue::Null, incoming.clone()), incoming);
        assert_eq!(coerce(&FieldValue::Null, FieldValue::Integer(1)), FieldValue::Integer(1));
        assert_eq!(coerce(&FieldValue::Null, FieldValue::Null), FieldValue::Null);
    }

    #[test]
    fn test_text_template() {
        let template = FieldValue::from("-999");
        assert_eq!(coerce(&template, FieldValue::Integer(-123)), FieldValue::from("-123"));
        assert_eq!(coerce(&template, FieldValue::Float(1.0)), FieldValue::from("1.0"));
        assert_eq!(coerce(&template, FieldValue::Null), FieldValue::from(""));
        assert_eq!(coerce(&template, list(&["a", "b"])), FieldValue::from("a, b"));
    }

    proptest! {
        #[test]
        fn prop_list_items_are_trimmed_and_non_empty(text in "[a-z ,]{0,40}") {
            let coerced = coerce(&list(&[]), FieldValue::from(text.as_str()));
            let items = coerced.as_list().unwrap();
            for item in items {
                prop_assert!(!item.is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
                prop_assert!(!item.contains(','));
            }
        }

        #[test]
        fn prop_text_template_always_yields_text(value in any::<i64>()) {
            let coerced = coerce(&FieldValue::from("x"), FieldValue::Integer(value));
            prop_assert_eq!(coerced, FieldValue::Text(value.to_string()));
        }

        #[test]
        fn prop_integer_template_keeps_shape(text in "\\PC{0,12}") {
            let coerced = coerce(&FieldValue::Integer(7), FieldValue::from(text.as_str()));
            prop_assert!(matches!(coerced, FieldValue::Integer(_)));
        }
    }
}
