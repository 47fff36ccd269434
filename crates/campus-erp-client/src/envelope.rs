//! Response envelope decoding.
//!
//! The backend wraps everything: list endpoints answer `{data: [...],
//! count: n}`, detail endpoints `{status, data}`, and validation failures
//! `{errors: {field: [messages]}}`. Success requires both the HTTP status
//! and the payload `status` field, when present, to be 200 or 201.

use std::collections::HashMap;

use serde::Deserialize;

use campus_erp_core::error::FieldErrors;
use campus_erp_core::value::Value;

/// A decoded list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    /// One JSON object per row.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    /// Total matching records across all pages.
    #[serde(default)]
    pub count: u64,
}

/// A decoded detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailEnvelope {
    /// Application status code, when the backend includes one.
    pub status: Option<u16>,
    /// The record.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Success requires the HTTP status and any payload `status` to agree.
pub fn is_success(http_status: u16, payload_status: Option<u16>) -> bool {
    let http_ok = http_status == 200 || http_status == 201;
    let payload_ok = payload_status.map_or(true, |s| s == 200 || s == 201);
    http_ok && payload_ok
}

/// Reads the payload-level `status` field, if the body carries one.
pub fn payload_status(body: &serde_json::Value) -> Option<u16> {
    body.get("status")
        .and_then(serde_json::Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
}

/// Pulls per-field validation messages out of an error body.
///
/// Accepts the enveloped form `{errors: {field: [...]}}` and the bare
/// serializer form `{field: [...]}`. A field may carry a single string or
/// a list of strings. Returns `None` when the body holds neither shape.
pub fn extract_field_errors(body: &serde_json::Value) -> Option<FieldErrors> {
    let map = body
        .get("errors")
        .and_then(serde_json::Value::as_object)
        .or_else(|| body.as_object())?;

    // Envelope keys are never field names.
    const RESERVED: [&str; 6] = ["status", "message", "detail", "error", "data", "count"];

    let mut errors = FieldErrors::new();
    for (field, messages) in map {
        if RESERVED.contains(&field.as_str()) {
            continue;
        }
        match messages {
            serde_json::Value::String(message) => errors.push(field, message),
            serde_json::Value::Array(items) => {
                for item in items {
                    if let serde_json::Value::String(message) = item {
                        errors.push(field, message);
                    }
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

/// Best-effort human message from an error body.
pub fn extract_message(body: &serde_json::Value) -> Option<String> {
    for key in ["message", "detail", "error"] {
        if let Some(message) = body.get(key).and_then(serde_json::Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}

/// Converts a JSON record object into the map form the form layer edits.
pub fn record_from_json(json: &serde_json::Value) -> HashMap<String, Value> {
    json.as_object().map_or_else(HashMap::new, |obj| {
        obj.iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect()
    })
}
