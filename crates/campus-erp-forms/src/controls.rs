//! The field renderer: descriptor → bound input control.
//!
//! [`render_control`] maps a [`FieldDef`] plus the current [`FormState`] to
//! a [`Control`], the typed description a UI shell binds to a concrete
//! widget. Dispatch over [`FieldKind`] is exhaustive, so adding a kind
//! without a control is a compile error.

use campus_erp_core::settings;
use campus_erp_core::value::Value;

use crate::fields::{ChoiceOption, FieldDef, FieldKind};
use crate::files::FilePreview;
use crate::state::FormState;

/// A bound input control for one field.
///
/// Each variant corresponds to one input widget; it carries the current
/// value in the shape that widget edits plus the per-kind configuration the
/// widget needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Single-line text input.
    TextInput {
        /// Current text.
        value: Option<String>,
        /// Placeholder text.
        placeholder: Option<String>,
        /// Character cap, with live count when set.
        max_length: Option<usize>,
    },
    /// Masked password input.
    PasswordInput {
        /// Current text.
        value: Option<String>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Email input.
    EmailInput {
        /// Current text.
        value: Option<String>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Numeric input.
    NumberInput {
        /// Current number.
        value: Option<f64>,
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
        /// Increment step; defaults to 1.
        step: f64,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Multi-line text area.
    Textarea {
        /// Current text.
        value: Option<String>,
        /// Placeholder text.
        placeholder: Option<String>,
        /// Character cap, with live count when set.
        max_length: Option<usize>,
    },
    /// Single-choice dropdown with searchable options.
    Select {
        /// Currently selected option value.
        selected: Option<Value>,
        /// All options.
        options: Vec<ChoiceOption>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Multiple-choice dropdown with searchable options.
    MultiSelect {
        /// Currently selected option values.
        selected: Vec<Value>,
        /// All options.
        options: Vec<ChoiceOption>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Radio button group.
    RadioGroup {
        /// Currently selected option value.
        selected: Option<Value>,
        /// All options.
        options: Vec<ChoiceOption>,
    },
    /// On/off switch.
    Switch {
        /// Current state.
        on: bool,
    },
    /// Date picker.
    DatePicker {
        /// Current date.
        value: Option<chrono::NaiveDate>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Time picker.
    TimePicker {
        /// Current time.
        value: Option<chrono::NaiveTime>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Combined date and time picker.
    DateTimePicker {
        /// Current date-time.
        value: Option<chrono::NaiveDateTime>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Start/end date range picker.
    RangePicker {
        /// Current range.
        value: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// File drop zone.
    FileDrop {
        /// Accept list shown and enforced.
        accept: String,
        /// Size cap in megabytes shown and enforced.
        max_size_mb: u64,
        /// Preview of the current file, if any.
        preview: Option<FilePreview>,
    },
}

fn string_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Int(i)) => Some(i.to_string()),
        Some(Value::Float(f)) => Some(f.to_string()),
        _ => None,
    }
}

fn number_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Int(i)) => Some(*i as f64),
        Some(Value::Float(f)) => Some(*f),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Renders the bound control for one field.
pub fn render_control(field: &FieldDef, form: &FormState) -> Control {
    let value = form.get(&field.name);

    match field.kind {
        FieldKind::Text => Control::TextInput {
            value: string_value(value),
            placeholder: field.placeholder.clone(),
            max_length: field.max_length,
        },
        FieldKind::Password => Control::PasswordInput {
            value: string_value(value),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Email => Control::EmailInput {
            value: string_value(value),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Number => Control::NumberInput {
            value: number_value(value),
            min: field.min,
            max: field.max,
            step: field.step.unwrap_or(1.0),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Textarea => Control::Textarea {
            value: string_value(value),
            placeholder: field.placeholder.clone(),
            max_length: field.max_length,
        },
        FieldKind::Select => Control::Select {
            selected: value.cloned(),
            options: field.options.clone(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::MultiSelect => Control::MultiSelect {
            selected: match value {
                Some(Value::List(items)) => items.clone(),
                Some(v) => vec![v.clone()],
                None => Vec::new(),
            },
            options: field.options.clone(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Radio => Control::RadioGroup {
            selected: value.cloned(),
            options: field.options.clone(),
        },
        FieldKind::Switch => Control::Switch {
            on: matches!(value, Some(Value::Bool(true))),
        },
        FieldKind::Date => Control::DatePicker {
            value: match value {
                Some(Value::Date(d)) => Some(*d),
                _ => None,
            },
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Time => Control::TimePicker {
            value: match value {
                Some(Value::Time(t)) => Some(*t),
                _ => None,
            },
            placeholder: field.placeholder.clone(),
        },
        FieldKind::DateTime => Control::DateTimePicker {
            value: match value {
                Some(Value::DateTime(dt)) => Some(*dt),
                _ => None,
            },
            placeholder: field.placeholder.clone(),
        },
        FieldKind::DateRange => Control::RangePicker {
            value: match value {
                Some(Value::DateRange(start, end)) => Some((*start, *end)),
                _ => None,
            },
            placeholder: field.placeholder.clone(),
        },
        FieldKind::File => Control::FileDrop {
            accept: field.accept.clone().unwrap_or_else(|| "*".to_string()),
            max_size_mb: field
                .max_size_mb
                .unwrap_or_else(|| settings::settings().max_upload_mb),
            preview: form.preview(&field.name).cloned(),
        },
    }
}

/// Filters options case-insensitively by label substring.
///
/// Used by select and multiselect search boxes.
pub fn filter_options<'a>(options: &'a [ChoiceOption], query: &str) -> Vec<&'a ChoiceOption> {
    let query = query.to_lowercase();
    options
        .iter()
        .filter(|opt| opt.label.to_lowercase().contains(&query))
        .collect()
}
