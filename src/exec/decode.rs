//! Decoding of `/api/exec` response bodies.
//!
//! The server double-encodes its result list: the outer body is a JSON object
//! whose `results` field is a *string* holding another JSON document. Everything
//! that knows about that lives here; callers only ever see the parsed list.

use serde_json::{Map, Value};

use super::types::{ExecutionResponse, ExecutionResult};
use crate::error::{OrangeError, Result};

/// Decodes a raw response body into an [`ExecutionResponse`].
///
/// The body is accepted only when `time` is a number and `results` is present
/// and truthy. A missing `results` field is rejected rather than read as an
/// empty batch, while `"[]"` decodes to an empty list.
pub fn decode_response(body: &str) -> Result<ExecutionResponse> {
    let outer: Value = serde_json::from_str(body)
        .map_err(|e| OrangeError::invalid_shape(format!("response body is not JSON: {e}")))?;

    let object = outer.as_object().ok_or_else(|| {
        OrangeError::invalid_shape(format!(
            "expected a JSON object, got {}",
            json_kind(&outer)
        ))
    })?;

    let time = decode_time(object)?;
    let encoded = encoded_results(object)?;

    let results: Vec<ExecutionResult> = serde_json::from_str(encoded).map_err(|e| {
        OrangeError::invalid_shape(format!("field 'results' is not a result list: {e}"))
    })?;

    Ok(ExecutionResponse { time, results })
}

fn decode_time(object: &Map<String, Value>) -> Result<f64> {
    match object.get("time") {
        None => Err(OrangeError::invalid_shape("missing field 'time'")),
        Some(value) => value.as_f64().ok_or_else(|| {
            OrangeError::invalid_shape(format!(
                "field 'time' must be a number, got {}",
                json_kind(value)
            ))
        }),
    }
}

fn encoded_results(object: &Map<String, Value>) -> Result<&str> {
    let value = object
        .get("results")
        .filter(|v| is_truthy(v))
        .ok_or_else(|| OrangeError::invalid_shape("missing or empty field 'results'"))?;

    value.as_str().ok_or_else(|| {
        OrangeError::invalid_shape(format!(
            "field 'results' must be a JSON-encoded string, got {}",
            json_kind(value)
        ))
    })
}

/// Loose truthiness used by the server's original web client.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
