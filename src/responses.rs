//! Shared GraphQL response shapes used across operations.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{LinearError, Result};
use crate::lenient;

/// A `{ nodes: [...] }` connection whose nodes must all decode.
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Connection<T> {
    #[serde(default, deserialize_with = "lenient::objects")]
    pub nodes: Option<Vec<T>>,
}

impl<T> Connection<T> {
    pub fn into_nodes(self, operation: &'static str) -> Result<Vec<T>> {
        required(self.nodes, operation, "nodes")
    }
}

/// The `{ success, <record> }` payload every create/update mutation returns.
///
/// The record is looked up by name in [`MutationPayload::into_record`].
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct MutationPayload<T> {
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub success: bool,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip)]
    _record: std::marker::PhantomData<T>,
}

impl<T: DeserializeOwned> MutationPayload<T> {
    /// Check `success` first and only then decode the record.
    pub fn into_record(mut self, operation: &'static str, key: &'static str) -> Result<T> {
        if !self.success {
            return Err(LinearError::MutationFailed { operation });
        }

        let record = self
            .fields
            .remove(key)
            .filter(Value::is_object)
            .ok_or(LinearError::MalformedResponse { operation, key })?;

        Ok(serde_json::from_value(record)?)
    }
}

/// Unwrap a container the response must contain.
pub fn required<T>(value: Option<T>, operation: &'static str, key: &'static str) -> Result<T> {
    value.ok_or(LinearError::MalformedResponse { operation, key })
}
