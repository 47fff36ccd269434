//! Form state for one open create/edit dialog.
//!
//! A [`FormState`] owns the values being edited, the originally-loaded wire
//! record (the diff baseline), pending file previews, and the per-field
//! error registry. It is created when a form opens and destroyed on
//! close/submit; nothing here outlives the dialog.

use std::collections::HashMap;

use tracing::debug;

use campus_erp_core::error::FieldErrors;
use campus_erp_core::value::{UploadFile, Value};

use crate::fields::FieldDef;
use crate::files::{self, FileError, FilePreview};
use crate::normalize;

/// The state of one open form instance.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<FieldDef>,
    values: HashMap<String, Value>,
    original: HashMap<String, Value>,
    previews: HashMap<String, FilePreview>,
    errors: FieldErrors,
    editing: bool,
    dirty: bool,
}

impl FormState {
    /// Creates a form in create mode, applying field initial values.
    pub fn open_create(fields: Vec<FieldDef>) -> Self {
        let mut values = HashMap::new();
        for field in &fields {
            if let Some(initial) = &field.initial {
                values.insert(field.name.clone(), initial.clone());
            }
        }
        Self {
            fields,
            values,
            original: HashMap::new(),
            previews: HashMap::new(),
            errors: FieldErrors::new(),
            editing: false,
            dirty: false,
        }
    }

    /// Creates a form in edit mode, prefilled from a fetched wire record.
    ///
    /// The record is kept as the diff baseline; the editable values go
    /// through [`normalize::wire_to_edit`], and persisted file paths get a
    /// remote preview.
    pub fn open_edit(fields: Vec<FieldDef>, record: HashMap<String, Value>) -> Self {
        let values = normalize::wire_to_edit(&fields, &record);
        let mut previews = HashMap::new();
        for field in &fields {
            if let Some(Value::FileRef(path)) = values.get(&field.name) {
                if let Some(preview) = files::preview_for_ref(path) {
                    previews.insert(field.name.clone(), preview);
                }
            }
        }
        Self {
            fields,
            values,
            original: record,
            previews,
            errors: FieldErrors::new(),
            editing: true,
            dirty: false,
        }
    }

    /// Returns the field descriptors.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the current value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns all current values.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Returns the originally-loaded wire record (empty in create mode).
    pub fn original(&self) -> &HashMap<String, Value> {
        &self.original
    }

    /// Sets a field value, marking the form dirty and clearing that field's
    /// errors.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.errors.remove(&name);
        self.values.insert(name, value.into());
        self.dirty = true;
    }

    /// Attaches an upload to a file field, gating on type and size first.
    ///
    /// A rejected file leaves the form untouched: no value, no preview.
    pub fn attach_file(&mut self, name: &str, file: UploadFile) -> Result<(), FileError> {
        let Some(field) = self.field(name) else {
            return Ok(());
        };
        if let Err(err) = files::validate_upload(field, &file) {
            debug!(field = name, %err, "upload rejected");
            return Err(err);
        }
        self.previews
            .insert(name.to_string(), files::preview_for_upload(&file));
        self.values.insert(name.to_string(), Value::File(file));
        self.dirty = true;
        Ok(())
    }

    /// Removes a file field's value and its preview.
    pub fn clear_file(&mut self, name: &str) {
        self.values.remove(name);
        self.previews.remove(name);
        self.dirty = true;
    }

    /// Returns the preview for a file field, if any.
    pub fn preview(&self, name: &str) -> Option<&FilePreview> {
        self.previews.get(name)
    }

    /// Returns the per-field error registry.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replaces the error registry (backend validation results).
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Returns `true` if this form edits an existing record.
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Returns `true` once any value changed since open.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears values, previews, errors, and the dirty flag.
    pub fn reset(&mut self) {
        self.values.clear();
        self.previews.clear();
        self.errors.clear();
        self.dirty = false;
    }
}
