//! Field descriptors.
//!
//! A [`FieldDef`] is the static metadata describing one form input: its kind,
//! label, options, validation rules, and file constraints. Descriptors are
//! defined per entity at page-construction time and never mutated.

use std::fmt;

use campus_erp_core::value::Value;

/// The kind of a form field.
///
/// This is the closed set of input types the renderer knows how to bind.
/// Rendering dispatches exhaustively on this enum; string tags coming in as
/// data go through [`FieldKind::parse`], where anything unknown falls back
/// to [`FieldKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Masked password input.
    Password,
    /// Email input.
    Email,
    /// Numeric input.
    Number,
    /// Multi-line text area.
    Textarea,
    /// Single-choice dropdown.
    Select,
    /// Multiple-choice dropdown.
    MultiSelect,
    /// Radio button group.
    Radio,
    /// On/off switch.
    Switch,
    /// Date picker (`YYYY-MM-DD`).
    Date,
    /// Time picker (`HH:mm:ss`).
    Time,
    /// Combined date and time picker.
    DateTime,
    /// Start/end date range picker.
    DateRange,
    /// File upload.
    File,
}

impl FieldKind {
    /// Parses a string tag into a kind.
    ///
    /// Unknown tags fall back to `Text`, matching the renderer contract for
    /// descriptors that arrive as data.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "multiselect" => Self::MultiSelect,
            "radio" => Self::Radio,
            "switch" => Self::Switch,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "daterange" => Self::DateRange,
            "file" => Self::File,
            _ => Self::Text,
        }
    }

    /// Returns `true` for kinds whose values pass through the date
    /// normalizer.
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime | Self::DateRange)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Radio => "radio",
            Self::Switch => "switch",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::DateRange => "daterange",
            Self::File => "file",
        };
        write!(f, "{tag}")
    }
}

/// One selectable option for select, multiselect, and radio fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    /// The value submitted when this option is chosen.
    pub value: Value,
    /// Human-readable label shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Creates a new option.
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A local validation rule, checked before any network call.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The field must hold a non-empty value.
    Required {
        /// Message shown when the field is empty.
        message: String,
    },
    /// Minimum string length.
    MinLength(usize),
    /// Maximum string length.
    MaxLength(usize),
    /// Minimum numeric value.
    Min(f64),
    /// Maximum numeric value.
    Max(f64),
    /// Value must look like an email address.
    Email,
    /// Value must match the given regular expression.
    Pattern(String),
}

impl Rule {
    /// Shorthand for a required rule with a message.
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }
}

/// Complete static description of one form field.
///
/// Built with a chained builder, the way entity pages declare their forms:
///
/// ```
/// use campus_erp_forms::fields::{FieldDef, FieldKind, Rule};
///
/// let field = FieldDef::new("name", "Class Name", FieldKind::Text)
///     .placeholder("Enter class name")
///     .rule(Rule::required("Please enter class name"));
/// assert_eq!(field.name, "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name; doubles as the wire key.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// The field kind, controlling rendering and normalization.
    pub kind: FieldKind,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Tooltip shown next to the label.
    pub tooltip: Option<String>,
    /// Options for select/multiselect/radio kinds.
    pub options: Vec<ChoiceOption>,
    /// Local validation rules.
    pub rules: Vec<Rule>,
    /// Accepted upload types for file kinds: `*`, `image/*`, exact MIME,
    /// or `.ext`, comma-separated.
    pub accept: Option<String>,
    /// Upload size cap in megabytes for file kinds.
    pub max_size_mb: Option<u64>,
    /// Minimum for number kinds.
    pub min: Option<f64>,
    /// Maximum for number kinds.
    pub max: Option<f64>,
    /// Step for number kinds.
    pub step: Option<f64>,
    /// Maximum length for text kinds.
    pub max_length: Option<usize>,
    /// Rendered but not editable.
    pub disabled: bool,
    /// Initial value applied on create.
    pub initial: Option<Value>,
}

impl FieldDef {
    /// Creates a new descriptor with the given name, label, and kind.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            tooltip: None,
            options: Vec::new(),
            rules: Vec::new(),
            accept: None,
            max_size_mb: None,
            min: None,
            max: None,
            step: None,
            max_length: None,
            disabled: false,
            initial: None,
        }
    }

    /// Sets the placeholder text.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the tooltip.
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Sets the selectable options.
    pub fn options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    /// Adds one selectable option.
    pub fn option(mut self, option: ChoiceOption) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a validation rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the accepted upload types.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Sets the upload size cap in megabytes.
    pub fn max_size_mb(mut self, mb: u64) -> Self {
        self.max_size_mb = Some(mb);
        self
    }

    /// Sets the numeric minimum.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the numeric maximum.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the numeric range.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Sets the numeric step.
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the maximum text length.
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Marks the field disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the initial value applied on create.
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Returns `true` if any rule requires a value.
    pub fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule, Rule::Required { .. }))
    }
}
