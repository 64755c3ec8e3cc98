//! Typed access to tool call arguments.

use serde::de::DeserializeOwned;

use crate::error::NauvooError;

/// The argument object carried by a tool call.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// The raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a required string field.
    pub fn get_str(&self, key: &str) -> Result<&str, NauvooError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| missing(key, "string"))
    }

    /// Get an optional string field.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get a required integer field.
    pub fn get_i64(&self, key: &str) -> Result<i64, NauvooError> {
        self.value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| missing(key, "integer"))
    }

    /// Get a required boolean field.
    pub fn get_bool(&self, key: &str) -> Result<bool, NauvooError> {
        self.value
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| missing(key, "boolean"))
    }

    /// Get a required array field.
    pub fn get_array(&self, key: &str) -> Result<&Vec<serde_json::Value>, NauvooError> {
        self.value
            .get(key)
            .and_then(|v| v.as_array())
            .ok_or_else(|| missing(key, "array"))
    }

    /// Deserialize the whole argument object into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, NauvooError> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}

fn missing(key: &str, expected: &str) -> NauvooError {
    NauvooError::InvalidArgument(format!("missing or non-{expected} field '{key}'"))
}
