//! Forgiving deserializers for stored JSON.
//!
//! Stored cards and template rows come from a schemaless backend. A field
//! with the wrong JSON type is read as absent instead of failing the whole
//! record, so old or hand-edited data still opens in the editor.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::template::Design;

/// Any string; anything else becomes the empty string.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// `Some` only for JSON strings.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Positive integer from a number or numeric string. Fractions are rounded.
pub(crate) fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u32(&value))
}

pub(crate) fn coerce_u32(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() && n >= 1.0 && n <= u32::MAX as f64 {
        Some(n.round() as u32)
    } else {
        None
    }
}

/// A design object; a non-object yields the empty design.
pub(crate) fn design<'de, D>(deserializer: D) -> Result<Design, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => Design::default(),
    })
}

/// Deserialize `T` from any value, falling back to `T::default()` when the
/// shape doesn't fit.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_u32() {
        assert_eq!(coerce_u32(&json!(24)), Some(24));
        assert_eq!(coerce_u32(&json!(15.6)), Some(16));
        assert_eq!(coerce_u32(&json!("18")), Some(18));
        assert_eq!(coerce_u32(&json!(0)), None);
        assert_eq!(coerce_u32(&json!(-3)), None);
        assert_eq!(coerce_u32(&json!("big")), None);
        assert_eq!(coerce_u32(&json!(null)), None);
    }

    #[derive(Deserialize)]
    struct Stored {
        #[serde(default, deserialize_with = "opt_string")]
        a: Option<String>,
        #[serde(default, deserialize_with = "string")]
        b: String,
        #[serde(default, deserialize_with = "boolean")]
        c: bool,
    }

    #[test]
    fn test_wrong_types_read_as_absent() {
        let p: Stored = serde_json::from_value(json!({"a": 1, "b": ["x"], "c": "yes"})).unwrap();
        assert_eq!(p.a, None);
        assert_eq!(p.b, "");
        assert!(!p.c);
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Stored = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.a, None);
        assert_eq!(p.b, "");
    }
}
