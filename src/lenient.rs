//! Forgiving field decoders for GraphQL payloads.
//!
//! Linear omits fields it was not asked for and returns `null` for unset
//! associations. These helpers are used with `#[serde(default, deserialize_with)]`
//! so that an absent or wrong-typed field becomes the zero value (or no
//! association) instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String field; anything that is not a JSON string becomes `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Integer field; floats are truncated, everything else (including values
/// outside the `i32` range) becomes `0`.
pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64));
    Ok(n.and_then(|n| i32::try_from(n).ok()).unwrap_or(0))
}

/// Float field; anything non-numeric becomes `0.0`.
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

/// Boolean field; anything that is not `true`/`false` becomes `false`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

/// Optional sub-object; anything that is not a JSON object decoding as `T`
/// becomes `None`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Array of objects that must all decode as `T`; a single non-object or
/// undecodable element rejects the whole array.
pub fn objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    if !items.iter().all(Value::is_object) {
        return Ok(None);
    }

    Ok(items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .ok())
}

/// Nested `{ nodes: [...] }` connection flattened to its elements.
///
/// A missing or mis-shaped connection is empty and elements that fail to
/// decode are skipped.
pub fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Object(mut connection) => match connection.remove("nodes") {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
