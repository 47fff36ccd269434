//! Local pre-submit validation.
//!
//! Rules run against the form values before any network call and accumulate
//! per-field errors without short-circuiting, so every problem is reported
//! at once. This is the client-side gate; the backend's own validation
//! arrives separately as structured field errors.

use once_cell::sync::Lazy;
use regex::Regex;

use campus_erp_core::error::FieldErrors;
use campus_erp_core::value::Value;

use crate::fields::Rule;
use crate::state::FormState;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Validates all fields of an open form against their rules.
///
/// Returns the accumulated per-field errors; empty means the form may be
/// submitted.
pub fn validate(form: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in form.fields() {
        if field.disabled {
            continue;
        }
        let value = form.get(&field.name);
        let empty = value.map_or(true, Value::is_empty);

        for rule in &field.rules {
            match rule {
                Rule::Required { message } => {
                    if empty {
                        errors.push(&field.name, message.clone());
                    }
                }
                Rule::MinLength(min) => {
                    if let Some(s) = value.and_then(as_str) {
                        if !s.is_empty() && s.chars().count() < *min {
                            errors.push(
                                &field.name,
                                format!("Must be at least {min} characters."),
                            );
                        }
                    }
                }
                Rule::MaxLength(max) => {
                    if let Some(s) = value.and_then(as_str) {
                        if s.chars().count() > *max {
                            errors.push(
                                &field.name,
                                format!("Must be at most {max} characters."),
                            );
                        }
                    }
                }
                Rule::Min(min) => {
                    if let Some(n) = value.and_then(as_number) {
                        if n < *min {
                            errors.push(&field.name, format!("Must be at least {min}."));
                        }
                    }
                }
                Rule::Max(max) => {
                    if let Some(n) = value.and_then(as_number) {
                        if n > *max {
                            errors.push(&field.name, format!("Must be at most {max}."));
                        }
                    }
                }
                Rule::Email => {
                    if let Some(s) = value.and_then(as_str) {
                        if !s.is_empty() && !EMAIL_RE.is_match(s) {
                            errors.push(&field.name, "Enter a valid email address.");
                        }
                    }
                }
                Rule::Pattern(pattern) => {
                    if let Some(s) = value.and_then(as_str) {
                        if let Ok(re) = Regex::new(pattern) {
                            if !s.is_empty() && !re.is_match(s) {
                                errors.push(&field.name, "Enter a valid value.");
                            }
                        }
                    }
                }
            }
        }
    }

    errors
}
