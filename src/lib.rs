//! formgen
//!
//! Schema-driven form engine: parse raw JSON text, validate it against
//! the FormSchema contract, compile renderable field descriptors,
//! collect and validate user input per field, and export a submission
//! artifact.
//!
//! # Example
//!
//! ```
//! use formgen::{parse_schema, CompiledSchema, FormController};
//!
//! let schema = parse_schema(r#"{
//!     "formTitle": "Signup",
//!     "formDescription": "Tell us who you are",
//!     "fields": [
//!         {
//!             "id": "name",
//!             "type": "text",
//!             "label": "Full Name",
//!             "required": true,
//!             "validation": { "pattern": "^[a-zA-Z ]+$" }
//!         }
//!     ]
//! }"#).unwrap();
//!
//! let compiled = CompiledSchema::compile(schema).unwrap();
//! let mut form = FormController::new(compiled);
//!
//! form.set_value("name", "Sajal Gupta").unwrap();
//! let record = form.submit().unwrap();
//! assert_eq!(record["name"], "Sajal Gupta");
//! ```
//!
//! # Error model
//!
//! Two error kinds cross the validation boundary: parse failures (one
//! message, with a position hint) and structural failures (one message
//! per violated rule). Both are recoverable - the previous valid schema
//! stays live until a new valid one replaces it. Field-level failures
//! are scoped to the offending field.

mod descriptor;
mod error;
mod form;
mod loader;
mod session;
mod types;
mod validator;

pub use descriptor::{CompiledSchema, Control, FieldDescriptor, RenderedForm};
pub use error::{FieldError, FormError, LoadError, SchemaError, ValidateError};
pub use form::{
    serialize_submission, ExportArtifact, FormController, FormState, SubmissionRecord,
    EXPORT_FILE_NAME, GENERIC_FIELD_MESSAGE,
};
pub use loader::{load_json, load_text};
pub use session::{EditorSession, ErrorState};
pub use types::{FieldOption, FieldSpec, FieldType, FormSchema, ValidationRule, FIELD_TYPES};
pub use validator::{check_structure, parse_schema};
