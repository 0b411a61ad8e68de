//! Editor session - the single-owner application state object.
//!
//! Holds the raw schema text, the live compiled schema, the form
//! controller, and the current error state. Every edit flows through
//! [`EditorSession::set_text`]: on success the live schema is replaced
//! wholesale and the controller resets; on failure the previous schema
//! stays rendered and only the error state changes.

use crate::descriptor::CompiledSchema;
use crate::error::ValidateError;
use crate::form::FormController;
use crate::types::FormSchema;
use crate::validator::parse_schema;

/// The current set of validation/parse error messages, if any.
/// Transient, recomputed on every edit; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorState {
    pub is_error: bool,
    pub messages: Vec<String>,
}

impl ErrorState {
    fn clear() -> Self {
        ErrorState::default()
    }

    fn from_error(error: &ValidateError) -> Self {
        ErrorState {
            is_error: true,
            messages: error.messages(),
        }
    }
}

/// The editor/renderer surface: schema source on one side, the
/// generated form on the other.
#[derive(Debug)]
pub struct EditorSession {
    text: String,
    form: FormController,
    error: ErrorState,
}

impl EditorSession {
    /// Start a session seeded with the sample schema.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors; the sample schema compiles.
    pub fn new() -> Result<Self, ValidateError> {
        Self::with_schema(FormSchema::sample())
    }

    /// Start a session from an already-validated schema.
    pub fn with_schema(schema: FormSchema) -> Result<Self, ValidateError> {
        let text = serde_json::to_string_pretty(&schema)
            .map_err(|source| ValidateError::Parse { source })?;
        let compiled = CompiledSchema::compile(schema)?;
        Ok(EditorSession {
            text,
            form: FormController::new(compiled),
            error: ErrorState::clear(),
        })
    }

    /// Apply an edit of the raw schema text.
    ///
    /// Returns whether the text validated. Valid text replaces the live
    /// schema and resets the form; invalid text keeps the previous
    /// schema live and records the error messages.
    pub fn set_text(&mut self, input: &str) -> bool {
        self.text = input.to_string();

        match parse_schema(input).and_then(CompiledSchema::compile) {
            Ok(compiled) => {
                self.form.replace_schema(compiled);
                self.error = ErrorState::clear();
                true
            }
            Err(error) => {
                self.error = ErrorState::from_error(&error);
                false
            }
        }
    }

    /// The verbatim raw text, as the clipboard-copy source.
    pub fn schema_text(&self) -> &str {
        &self.text
    }

    /// The live validated schema (the last one that validated).
    pub fn schema(&self) -> &FormSchema {
        self.form.schema()
    }

    pub fn error_state(&self) -> &ErrorState {
        &self.error
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_text(title: &str) -> String {
        json!({
            "formTitle": title,
            "formDescription": "D",
            "fields": [
                { "id": "name", "type": "text", "label": "Name", "required": true }
            ]
        })
        .to_string()
    }

    #[test]
    fn starts_with_sample_schema_and_no_errors() {
        let session = EditorSession::new().unwrap();
        assert!(!session.error_state().is_error);
        assert_eq!(session.schema(), &FormSchema::sample());
        assert!(session.schema_text().contains("formTitle"));
    }

    #[test]
    fn valid_edit_replaces_schema() {
        let mut session = EditorSession::new().unwrap();
        assert!(session.set_text(&valid_text("New Form")));
        assert_eq!(session.schema().form_title, "New Form");
        assert!(!session.error_state().is_error);
    }

    #[test]
    fn invalid_edit_keeps_previous_schema() {
        let mut session = EditorSession::new().unwrap();
        session.set_text(&valid_text("Kept"));

        assert!(!session.set_text("{ broken"));
        assert!(session.error_state().is_error);
        assert_eq!(session.schema().form_title, "Kept");
    }

    #[test]
    fn structural_errors_listed_in_state() {
        let mut session = EditorSession::new().unwrap();
        assert!(!session.set_text("{}"));

        let state = session.error_state();
        assert!(state.is_error);
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages[0], "Error in 'formTitle': Required");
    }

    #[test]
    fn empty_edit_reports_unexpected_eof() {
        let mut session = EditorSession::new().unwrap();
        assert!(!session.set_text(""));
        assert_eq!(
            session.error_state().messages,
            vec!["Unexpected end of input".to_string()]
        );
    }

    #[test]
    fn schema_replacement_resets_form_values() {
        let mut session = EditorSession::new().unwrap();
        session.set_text(&valid_text("One"));
        session.form_mut().set_value("name", "Ada").unwrap();
        session.form_mut().submit().unwrap();

        session.set_text(&valid_text("Two"));
        let form = session.form();
        assert_eq!(form.state(), crate::form::FormState::Editing);
        assert!(form.submission().is_none());
        let field = form.schema().field("name").unwrap().clone();
        assert_eq!(form.current_value(&field), "");
    }

    #[test]
    fn failed_edit_leaves_form_untouched() {
        let mut session = EditorSession::new().unwrap();
        session.set_text(&valid_text("One"));
        session.form_mut().set_value("name", "Ada").unwrap();

        session.set_text("not json at all");
        let form = session.form();
        let field = form.schema().field("name").unwrap().clone();
        assert_eq!(form.current_value(&field), "Ada");
    }

    #[test]
    fn raw_text_preserved_verbatim_even_when_invalid() {
        let mut session = EditorSession::new().unwrap();
        session.set_text("{ half typed");
        assert_eq!(session.schema_text(), "{ half typed");
    }
}
