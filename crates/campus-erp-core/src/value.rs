//! Value types for form fields and entity records.
//!
//! The [`Value`] enum is the universal representation of a field value as it
//! moves between the wire (JSON from the REST backend), the edit layer (form
//! state with parsed dates), and outgoing payloads. File-typed fields hold
//! either a pending in-memory upload ([`Value::File`]) or a persisted
//! URL/path ([`Value::FileRef`]), never both.

use std::fmt;

/// An in-memory file pending upload.
///
/// Created when the user attaches a file to a form; discarded once the
/// submission succeeds or the field is cleared. The bytes never pass through
/// date normalization or JSON encoding — a pending file forces the whole
/// payload into multipart encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, used as the multipart filename.
    pub file_name: String,
    /// MIME type as reported by the picker (e.g. `image/png`).
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates a new `UploadFile`.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the MIME type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// A field value in a form or entity record.
///
/// # Examples
///
/// ```
/// use campus_erp_core::value::Value;
///
/// let v = Value::from(42_i64);
/// assert_eq!(v, Value::Int(42));
///
/// let v = Value::from("Class 5A");
/// assert_eq!(v, Value::String("Class 5A".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / JSON null.
    Null,
    /// A boolean (switch fields, `is_active`).
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A date without time.
    Date(chrono::NaiveDate),
    /// A time without date.
    Time(chrono::NaiveTime),
    /// A date and time without timezone.
    DateTime(chrono::NaiveDateTime),
    /// An inclusive date range; the edit-side form of a
    /// `<field>Start`/`<field>End` wire pair.
    DateRange(chrono::NaiveDate, chrono::NaiveDate),
    /// A list of values (multiselect fields).
    List(Vec<Value>),
    /// An in-memory file pending upload.
    File(UploadFile),
    /// A persisted URL or path to an already-uploaded file.
    FileRef(String),
}

impl Value {
    /// Returns `true` if the value counts as empty for diff and
    /// required-field purposes: `Null`, an empty string, or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` for a pending in-memory upload.
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Converts a JSON wire value into a `Value`.
    ///
    /// Strings stay strings here; parsing into date types is the
    /// normalizer's job because it depends on the field kind.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || Self::Float(n.as_f64().unwrap_or(0.0)),
                Self::Int,
            ),
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(_) => Self::String(json.to_string()),
        }
    }

    /// Converts this value into its JSON wire representation.
    ///
    /// Returns `None` for [`Value::File`]: a pending upload has no JSON form
    /// and must be sent as a multipart part instead. Temporal values render
    /// with the backend's fixed formats.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Null => Some(serde_json::Value::Null),
            Self::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Self::Int(i) => Some(serde_json::Value::from(*i)),
            Self::Float(f) => Some(serde_json::Value::from(*f)),
            Self::String(s) => Some(serde_json::Value::String(s.clone())),
            Self::Date(d) => Some(serde_json::Value::String(
                d.format("%Y-%m-%d").to_string(),
            )),
            Self::Time(t) => Some(serde_json::Value::String(
                t.format("%H:%M:%S").to_string(),
            )),
            Self::DateTime(dt) => Some(serde_json::Value::String(
                dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            )),
            // Ranges expand to two wire keys; a lone range has no single
            // JSON form, so render it as a two-element array.
            Self::DateRange(start, end) => Some(serde_json::Value::Array(vec![
                serde_json::Value::String(start.format("%Y-%m-%d").to_string()),
                serde_json::Value::String(end.format("%Y-%m-%d").to_string()),
            ])),
            Self::List(items) => {
                let out: Option<Vec<serde_json::Value>> =
                    items.iter().map(Self::to_json).collect();
                out.map(serde_json::Value::Array)
            }
            Self::File(_) => None,
            Self::FileRef(url) => Some(serde_json::Value::String(url.clone())),
        }
    }

    /// Renders the value as the string form used for multipart scalar parts.
    pub fn to_part_string(&self) -> String {
        match self.to_json() {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::DateRange(start, end) => write!(f, "{start}..{end}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::File(file) => write!(f, "<{} ({} bytes)>", file.file_name, file.size()),
            Self::FileRef(url) => write!(f, "{url}"),
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<chrono::NaiveTime> for Value {
    fn from(v: chrono::NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(v: chrono::NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<UploadFile> for Value {
    fn from(v: UploadFile) -> Self {
        Self::File(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
