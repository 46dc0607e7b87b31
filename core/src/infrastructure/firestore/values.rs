//! Conversion between plain JSON and Firestore's typed value encoding.

use serde_json::{Map, Number, Value, json};

use crate::domain::common::entities::app_errors::CoreError;

pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore transports 64-bit integers as strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": to_firestore_fields(map) } }),
    }
}

pub fn to_firestore_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), to_firestore_value(value)))
        .collect()
}

pub fn from_firestore_value(value: &Value) -> Result<Value, CoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(invalid(value));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool).ok_or_else(|| invalid(value)),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(|i| Value::Number(i.into()))
            .ok_or_else(|| invalid(value)),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid(value)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.as_str().map(|s| Value::String(s.to_string())).ok_or_else(|| invalid(value))
        }
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values").and_then(Value::as_array) {
                Some(items) => items
                    .iter()
                    .map(from_firestore_value)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields").and_then(Value::as_object) {
                Some(fields) => from_firestore_fields(fields)?,
                None => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        _ => Err(invalid(value)),
    }
}

pub fn from_firestore_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, CoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), from_firestore_value(value)?)))
        .collect()
}

fn invalid(value: &Value) -> CoreError {
    CoreError::ExternalServiceError(format!("Unsupported Firestore value: {}", value))
}
