//! Form state controller - tracks per-field values, validity, and the
//! submission lifecycle.
//!
//! The controller owns only the current input values; the compiled
//! schema owns the rendered field set. Replacing the schema resets the
//! controller unconditionally.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::descriptor::CompiledSchema;
use crate::error::{FieldError, FormError};
use crate::types::{FieldSpec, FieldType};

/// File name of the exported submission artifact.
pub const EXPORT_FILE_NAME: &str = "yourSubmission.json";

/// Message shown when a field has no custom validation message.
pub const GENERIC_FIELD_MESSAGE: &str = "This field is required";

/// Values the end user entered, keyed by field id in schema order.
pub type SubmissionRecord = serde_json::Map<String, Value>;

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Inputs accept values; submit is available.
    #[default]
    Editing,
    /// Inputs are read-only; preview and export become available.
    Submitted,
}

/// The form state machine over a compiled schema.
#[derive(Debug)]
pub struct FormController {
    compiled: CompiledSchema,
    state: FormState,
    values: HashMap<String, String>,
    submission: Option<SubmissionRecord>,
    show_preview: bool,
}

impl FormController {
    pub fn new(compiled: CompiledSchema) -> Self {
        FormController {
            compiled,
            state: FormState::Editing,
            values: HashMap::new(),
            submission: None,
            show_preview: false,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == FormState::Submitted
    }

    pub fn compiled(&self) -> &CompiledSchema {
        &self.compiled
    }

    pub fn schema(&self) -> &crate::types::FormSchema {
        self.compiled.schema()
    }

    /// Set a field's value.
    ///
    /// # Errors
    ///
    /// Returns `FormError::ReadOnly` after submission and
    /// `FormError::UnknownField` for ids not in the schema.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), FormError> {
        if self.state == FormState::Submitted {
            return Err(FormError::ReadOnly);
        }
        if self.compiled.schema().field(id).is_none() {
            return Err(FormError::UnknownField { id: id.to_string() });
        }
        self.values.insert(id.to_string(), value.into());
        Ok(())
    }

    /// The value a field would submit with right now.
    ///
    /// Untouched select fields fall back to their first option, the way
    /// a rendered dropdown implicitly selects it.
    pub fn current_value(&self, field: &FieldSpec) -> String {
        if let Some(value) = self.values.get(&field.id) {
            return value.clone();
        }
        if field.field_type == FieldType::Select {
            if let Some(first) = field.options.as_ref().and_then(|o| o.first()) {
                return first.value.clone();
            }
        }
        String::new()
    }

    /// Validate every field: required-ness first, then pattern match
    /// for text/email. Exactly one error per offending field.
    pub fn validate_all(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in &self.compiled.schema().fields {
            let value = self.current_value(field);
            let blank = value.trim().is_empty();

            let failed = if field.is_required() && blank {
                true
            } else if !blank {
                match self.compiled.pattern(&field.id) {
                    Some(regex) => !regex.is_match(&value),
                    None => false,
                }
            } else {
                false
            };

            if failed {
                let message = field
                    .validation
                    .as_ref()
                    .and_then(|v| v.message.clone())
                    .unwrap_or_else(|| GENERIC_FIELD_MESSAGE.to_string());
                errors.push(FieldError {
                    id: field.id.clone(),
                    message,
                });
            }
        }

        errors
    }

    /// Attempt the Editing → Submitted transition.
    ///
    /// On success captures the current values into a submission record,
    /// in schema field order. On failure the controller stays in
    /// Editing; nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns `FormError::ReadOnly` when already submitted, or
    /// `FormError::Invalid` with the per-field messages.
    pub fn submit(&mut self) -> Result<&SubmissionRecord, FormError> {
        if self.state == FormState::Submitted {
            return Err(FormError::ReadOnly);
        }

        let errors = self.validate_all();
        if !errors.is_empty() {
            return Err(FormError::Invalid { errors });
        }

        let mut record = SubmissionRecord::new();
        for field in &self.compiled.schema().fields {
            record.insert(field.id.clone(), Value::String(self.current_value(field)));
        }

        self.submission = Some(record);
        self.state = FormState::Submitted;

        // submit() only errored above, so the record is present
        self.submission.as_ref().ok_or(FormError::NoSubmission)
    }

    /// Return to Editing via the explicit "edit" action. Entered values
    /// are kept; the preview panel closes.
    pub fn edit(&mut self) {
        self.state = FormState::Editing;
        self.show_preview = false;
    }

    /// Replace the live schema, clearing all values and returning to
    /// Editing regardless of current state.
    pub fn replace_schema(&mut self, compiled: CompiledSchema) {
        self.compiled = compiled;
        self.state = FormState::Editing;
        self.values.clear();
        self.submission = None;
        self.show_preview = false;
    }

    /// The captured submission, if any.
    pub fn submission(&self) -> Option<&SubmissionRecord> {
        self.submission.as_ref()
    }

    /// Toggle the raw-data preview panel.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NoSubmission` outside the Submitted state.
    pub fn toggle_preview(&mut self) -> Result<bool, FormError> {
        if self.state != FormState::Submitted {
            return Err(FormError::NoSubmission);
        }
        self.show_preview = !self.show_preview;
        Ok(self.show_preview)
    }

    /// The preview panel content, when open.
    pub fn preview(&self) -> Option<String> {
        if !self.show_preview {
            return None;
        }
        let record = self.submission.as_ref()?;
        serialize_submission(record).ok()
    }

    /// Export the submission as a downloadable artifact.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NoSubmission` before a successful submit.
    pub fn export(&self) -> Result<ExportArtifact, FormError> {
        let record = self.submission.as_ref().ok_or(FormError::NoSubmission)?;
        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            content: serialize_submission(record)?,
        })
    }
}

/// A downloadable submission artifact: its file name and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content: String,
}

/// Serialize a submission record with 4-space indentation.
pub fn serialize_submission(record: &SubmissionRecord) -> Result<String, serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
