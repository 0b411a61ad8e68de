//! Error types for schema validation and form handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading input for the CLI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::ReadError { .. } => 3,
            Self::InvalidJson { .. } => 2,
        }
    }
}

/// Errors during schema validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Empty or truncated input.
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Malformed JSON. The message carries serde's position hint.
    #[error("{source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON that violates the FormSchema contract,
    /// one entry per violated rule, in document order.
    #[error("schema validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnexpectedEof | Self::Parse { .. } => 2,
            Self::Invalid { .. } => 1,
        }
    }

    /// Human-readable messages for the error panel: a single message for
    /// parse failures, one per violated rule for structural failures.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Invalid { errors } => errors.iter().map(|e| e.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Single structural violation with path context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaError {
    /// Dot-separated path to the offending key (e.g. "fields.0.type").
    /// Empty for root-level violations.
    pub path: String,
    /// Human-readable rule description.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "Error: {}", self.message)
        } else {
            write!(f, "Error in '{}': {}", self.path, self.message)
        }
    }
}

/// Errors from the form state controller.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form is read-only after submission")]
    ReadOnly,

    #[error("unknown field id '{id}'")]
    UnknownField { id: String },

    #[error("no submission captured yet")]
    NoSubmission,

    #[error("submission blocked with {} invalid field(s)", errors.len())]
    Invalid { errors: Vec<FieldError> },

    #[error("failed to serialize submission: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl FormError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid { .. } => 1,
            _ => 2,
        }
    }
}

/// Single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// The field's id within the schema.
    pub id: String,
    /// The field's custom validation message, or the generic fallback.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}
