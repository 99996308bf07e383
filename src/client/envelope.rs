//! Response envelope handling
//!
//! The portal API sometimes wraps payloads as `{ "data": ..., "message": ... }`
//! and sometimes returns the payload directly. [`Payload`] records which of
//! the two shapes a response had instead of silently coalescing them, and a
//! body that fits neither is rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Keys that only ever appear on the envelope itself
const ENVELOPE_KEYS: &[&str] = &["data", "message", "error", "success", "status"];

/// A decoded success payload and the shape it arrived in
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// `{ "data": T, ... }`
    Enveloped { data: T, message: Option<String> },
    /// The body itself was `T`
    Bare(T),
}

impl<T: DeserializeOwned> Payload<T> {
    /// Decode a success body.
    ///
    /// - an object with a non-null `data` must decode `data` as `T`
    /// - an object made only of envelope keys with no usable `data` is rejected
    /// - anything else must decode as `T` directly
    pub fn decode(value: Value) -> ApiResult<Self> {
        if let Value::Object(map) = &value {
            match map.get("data") {
                Some(data) if !data.is_null() => {
                    let data = serde_json::from_value(data.clone()).map_err(|e| {
                        ApiError::UnexpectedShape(format!(
                            "envelope `data` did not match the expected type: {}",
                            e
                        ))
                    })?;
                    let message = map
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    return Ok(Payload::Enveloped { data, message });
                }
                _ => {
                    if !map.is_empty() && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str())) {
                        return Err(ApiError::UnexpectedShape(format!(
                            "envelope without data (keys: {})",
                            map.keys().cloned().collect::<Vec<_>>().join(", ")
                        )));
                    }
                }
            }
        }

        serde_json::from_value(value).map(Payload::Bare).map_err(|e| {
            ApiError::UnexpectedShape(format!(
                "body is neither a data envelope nor the expected payload: {}",
                e
            ))
        })
    }
}

impl<T> Payload<T> {
    /// The payload, whichever shape it came in
    pub fn into_inner(self) -> T {
        match self {
            Payload::Enveloped { data, .. } => data,
            Payload::Bare(data) => data,
        }
    }

    pub fn is_enveloped(&self) -> bool {
        matches!(self, Payload::Enveloped { .. })
    }

    /// Envelope message, if the payload was wrapped and carried one
    pub fn message(&self) -> Option<&str> {
        match self {
            Payload::Enveloped { message, .. } => message.as_deref(),
            Payload::Bare(_) => None,
        }
    }
}

/// Acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Any other top-level fields the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Decode an acknowledgement body. An empty body is an empty acknowledgement.
    pub fn from_value(value: Value) -> ApiResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| ApiError::UnexpectedShape(format!("acknowledgement: {}", e))),
            other => Err(ApiError::UnexpectedShape(format!(
                "acknowledgement must be a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Decode the `data` field as `T`
    pub fn data_as<T: DeserializeOwned>(&self) -> ApiResult<Option<T>> {
        match &self.data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => serde_json::from_value(data.clone())
                .map(Some)
                .map_err(|e| ApiError::Decode(e.to_string())),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
