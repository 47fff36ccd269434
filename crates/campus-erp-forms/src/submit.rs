//! Submission payload construction.
//!
//! [`build_submission`] turns an open form into the payload the API client
//! sends: the full record on create, only the changed fields on edit.
//! Encoding switches to multipart when any pending upload made the cut,
//! JSON otherwise.

use tracing::debug;

use campus_erp_core::error::FieldErrors;
use campus_erp_core::value::{UploadFile, Value};

use crate::normalize;
use crate::state::FormState;
use crate::validation;

/// Whether the submission creates a new record or patches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// POST to the entity's create endpoint.
    Create,
    /// PATCH to the entity's detail endpoint.
    Edit,
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Form part name.
    pub name: String,
    /// Part content.
    pub body: PartBody,
}

/// Content of a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    /// A scalar rendered as text.
    Text(String),
    /// A pending upload sent with its file name and content type.
    File(UploadFile),
}

/// The encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON object body.
    Json(serde_json::Map<String, serde_json::Value>),
    /// A multipart/form-data body.
    Multipart(Vec<Part>),
}

impl Payload {
    /// Returns `true` for a multipart body.
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Number of fields or parts in the body.
    pub fn len(&self) -> usize {
        match self {
            Self::Json(map) => map.len(),
            Self::Multipart(parts) => parts.len(),
        }
    }

    /// Returns `true` if the body carries nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A ready-to-send form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Create or edit.
    pub mode: SubmitMode,
    /// Record id in edit mode, used for the detail URL.
    pub id: Option<String>,
    /// The encoded body.
    pub payload: Payload,
}

/// Why a submission was not built.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAbort {
    /// Local validation failed; the field errors to show.
    Validation(FieldErrors),
    /// Edit mode with no changed field. Nothing to send.
    NoChanges,
}

/// Wire-level equality for diffing.
///
/// Backends echo numeric columns back as strings, so `5` and `"5"` must
/// compare equal or every untouched numeric field would look changed.
/// Integer-valued pairs compare as integers, keeping ids beyond f64
/// precision exact.
fn wire_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    // An untouched persisted file path loads as FileRef but the record
    // holds the plain string.
    if let (Value::FileRef(x), Value::String(y)) | (Value::String(x), Value::FileRef(y)) = (a, b) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (as_int(a), as_int(b)) {
        return x == y;
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => false,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Builds the submission for an open form, or says why there is none.
///
/// Local validation runs first; any failure aborts before a payload is
/// built. In create mode the full value set is sent, explicit empties
/// included. In edit mode a field is sent only when it is a pending
/// upload, its wire value differs from the loaded record, or it is newly
/// filled in; the record id always rides along. An edit where nothing
/// survives the diff aborts with [`SubmitAbort::NoChanges`].
pub fn build_submission(form: &FormState) -> Result<Submission, SubmitAbort> {
    let errors = validation::validate(form);
    if !errors.is_empty() {
        return Err(SubmitAbort::Validation(errors));
    }

    let wire = normalize::edit_to_wire(form.fields(), form.values());
    let original = form.original();
    let editing = form.is_editing();

    let mut included: Vec<(String, Value)> = Vec::new();
    for (key, value) in &wire {
        let keep = if editing {
            let baseline = original.get(key);
            key == "id"
                || value.is_file()
                || match baseline {
                    Some(old) => !wire_eq(old, value),
                    None => !value.is_empty(),
                }
        } else {
            true
        };
        if keep {
            included.push((key.clone(), value.clone()));
        }
    }
    // The record id may live only in the baseline when the form never
    // surfaced it as a field.
    if editing && !included.iter().any(|(k, _)| k == "id") {
        if let Some(id) = original.get("id") {
            included.push(("id".to_string(), id.clone()));
        }
    }
    // Stable part order for request logging and tests.
    included.sort_by(|(a, _), (b, _)| a.cmp(b));

    if editing && included.iter().all(|(k, _)| k == "id") {
        return Err(SubmitAbort::NoChanges);
    }

    let id = if editing {
        original.get("id").map(ToString::to_string)
    } else {
        None
    };

    let has_file = included.iter().any(|(_, v)| v.is_file());
    let payload = if has_file {
        let mut parts = Vec::with_capacity(included.len());
        for (name, value) in included {
            let body = match value {
                Value::File(file) => PartBody::File(file),
                Value::Null => continue,
                other => PartBody::Text(other.to_part_string()),
            };
            parts.push(Part { name, body });
        }
        Payload::Multipart(parts)
    } else {
        let mut map = serde_json::Map::new();
        for (name, value) in included {
            if let Some(json) = value.to_json() {
                map.insert(name, json);
            }
        }
        Payload::Json(map)
    };

    debug!(
        fields = payload.len(),
        multipart = payload.is_multipart(),
        editing,
        "submission built"
    );
    Ok(Submission {
        mode: if editing {
            SubmitMode::Edit
        } else {
            SubmitMode::Create
        },
        id,
        payload,
    })
}
