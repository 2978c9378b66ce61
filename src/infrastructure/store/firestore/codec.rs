//! Conversion between plain JSON fields and Firestore typed values.

use serde_json::{Map, Number, Value, json};

use crate::domain::ports::Fields;

/// Wraps a plain JSON value in its Firestore value type.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => n.as_i64().map_or_else(
            || json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
            |i| json!({ "integerValue": i.to_string() }),
        ),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encodes a document body's `fields` map.
#[must_use]
pub fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Unwraps a Firestore typed value into plain JSON.
///
/// Timestamps, references and bytes become strings.
///
/// # Errors
/// Returns a description of the first value that has no known type tag.
pub fn decode_value(value: &Value) -> Result<Value, String> {
    let Some((tag, inner)) = value.as_object().and_then(|map| map.iter().next()) else {
        return Err(format!("expected a typed value, got {value}"));
    };

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| format!("bad booleanValue {inner}")),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| format!("bad integerValue {inner}"))
        }
        "doubleValue" => {
            let parsed = match inner {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            };
            Ok(parsed
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number))
        }
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("bad {tag} {inner}")),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map_or(Ok(Vec::new()), |values| {
                values.iter().map(decode_value).collect()
            })
            .map(Value::Array),
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            decode_fields(&fields).map(Value::Object)
        }
        other => Err(format!("unknown value type {other}")),
    }
}

/// Decodes a document's `fields` map.
///
/// # Errors
/// Returns a description of the first undecodable field.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Fields, String> {
    fields
        .iter()
        .map(|(key, value)| {
            decode_value(value)
                .map(|plain| (key.clone(), plain))
                .map_err(|e| format!("{key}: {e}"))
        })
        .collect()
}

/// Quotes a field name for an update mask when it is not a simple identifier.
#[must_use]
pub fn field_path(name: &str) -> String {
    let simple = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_member_fields_survive_encoding() {
        let fields = object(json!({
            "name": "Ana",
            "bookValue": "150.5",
            "isPWD": true,
            "visits": 3,
            "ratio": 0.5,
            "note": null,
            "tags": ["vip"],
            "meta": { "source": "desk" }
        }));

        let encoded = encode_fields(&fields);
        assert_eq!(encoded["visits"], json!({ "integerValue": "3" }));
        assert_eq!(encoded["isPWD"], json!({ "booleanValue": true }));

        assert_eq!(decode_fields(&encoded).unwrap(), fields);
    }

    #[test]
    fn test_decode_foreign_types() {
        let encoded = object(json!({
            "timestamp": { "timestampValue": "2025-01-05T07:04:05Z" },
            "count": { "integerValue": 7 },
            "empty": { "arrayValue": {} },
            "nested": { "mapValue": {} }
        }));

        let decoded = decode_fields(&encoded).unwrap();

        assert_eq!(decoded["timestamp"], "2025-01-05T07:04:05Z");
        assert_eq!(decoded["count"], 7);
        assert_eq!(decoded["empty"], json!([]));
        assert_eq!(decoded["nested"], json!({}));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let encoded = object(json!({ "x": { "weirdValue": 1 } }));

        let err = decode_fields(&encoded).unwrap_err();
        assert!(err.starts_with("x:"));
    }

    #[test]
    fn test_field_path_quoting() {
        assert_eq!(field_path("isPWD"), "isPWD");
        assert_eq!(field_path("first name"), "`first name`");
        assert_eq!(field_path("9lives"), "`9lives`");
    }
}
