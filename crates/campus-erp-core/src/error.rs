//! Core error types shared across the campus-erp crates.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A registry of per-field error messages.
///
/// Populated from backend validation payloads (`{errors: {name: ["..."]}}`)
/// and from local pre-submit validation. Each field can carry one or many
/// messages.
///
/// # Examples
///
/// ```
/// use campus_erp_core::error::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.push("name", "This field is required.");
/// assert_eq!(errors.get("name"), Some(&vec!["This field is required.".to_string()]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one message to a field's error list.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Replaces a field's error list wholesale.
    pub fn set(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.errors.insert(field.into(), messages);
    }

    /// Returns the messages for a field, if any.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns `true` if no field has errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Removes one field's entry.
    pub fn remove(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.errors.iter()
    }

    /// Merges another registry into this one, appending messages.
    pub fn extend(&mut self, other: Self) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<HashMap<String, Vec<String>>> for FieldErrors {
    fn from(errors: HashMap<String, Vec<String>>) -> Self {
        Self { errors }
    }
}

/// Errors raised by the core crate itself.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A settings file or payload failed to parse.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred (settings file access, token persistence).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;
