//! Core types for the form schema contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field type names accepted by the schema contract, in display order.
pub const FIELD_TYPES: &[&str] = &["text", "email", "select", "radio", "textarea"];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated form description: title, description, and ordered fields.
///
/// Immutable once validated; replaced wholesale on each edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(rename = "formTitle")]
    pub form_title: String,
    #[serde(rename = "formDescription")]
    pub form_description: String,
    pub fields: Vec<FieldSpec>,
}

/// One form field: type, label, and validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique within a schema.
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Present and non-empty for select/radio fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl FieldSpec {
    /// Whether the field must carry a non-blank value on submit.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// The pattern source attached to this field, if any.
    pub fn pattern_source(&self) -> Option<&str> {
        self.validation.as_ref()?.pattern.as_deref()
    }
}

/// The kind of input control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Select,
    Radio,
    Textarea,
}

impl FieldType {
    /// Parse a field type from a string.
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FieldType::Text),
            "email" => Some(FieldType::Email),
            "select" => Some(FieldType::Select),
            "radio" => Some(FieldType::Radio),
            "textarea" => Some(FieldType::Textarea),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Textarea => "textarea",
        }
    }

    /// Whether the type enumerates its values from `options`.
    pub fn expects_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    /// Whether the type accepts free text constrained by `validation.pattern`.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Email)
    }
}

/// One choice in a select or radio field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Optional per-field validation rule: a regex source and a custom message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormSchema {
    /// The seed schema the editor session starts from.
    pub fn sample() -> Self {
        FormSchema {
            form_title: "Project Requirements Survey".to_string(),
            form_description: "Please fill out this survey about your project needs".to_string(),
            fields: vec![
                FieldSpec {
                    id: "name".to_string(),
                    field_type: FieldType::Text,
                    label: "Full Name".to_string(),
                    required: Some(true),
                    placeholder: Some("Enter your full name".to_string()),
                    options: None,
                    validation: Some(ValidationRule {
                        pattern: Some("^[a-zA-Z ]+$".to_string()),
                        message: Some("Name may only contain letters and spaces".to_string()),
                    }),
                },
                FieldSpec {
                    id: "email".to_string(),
                    field_type: FieldType::Email,
                    label: "Email Address".to_string(),
                    required: Some(true),
                    placeholder: Some("you@example.com".to_string()),
                    options: None,
                    validation: Some(ValidationRule {
                        pattern: Some("^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$".to_string()),
                        message: Some("Please enter a valid email address".to_string()),
                    }),
                },
                FieldSpec {
                    id: "companySize".to_string(),
                    field_type: FieldType::Select,
                    label: "Company Size".to_string(),
                    required: Some(true),
                    placeholder: None,
                    options: Some(vec![
                        FieldOption {
                            value: "1-50".to_string(),
                            label: "1-50 employees".to_string(),
                        },
                        FieldOption {
                            value: "51-200".to_string(),
                            label: "51-200 employees".to_string(),
                        },
                        FieldOption {
                            value: "201+".to_string(),
                            label: "201+ employees".to_string(),
                        },
                    ]),
                    validation: None,
                },
                FieldSpec {
                    id: "industry".to_string(),
                    field_type: FieldType::Radio,
                    label: "Industry".to_string(),
                    required: Some(true),
                    placeholder: None,
                    options: Some(vec![
                        FieldOption {
                            value: "tech".to_string(),
                            label: "Technology".to_string(),
                        },
                        FieldOption {
                            value: "healthcare".to_string(),
                            label: "Healthcare".to_string(),
                        },
                        FieldOption {
                            value: "finance".to_string(),
                            label: "Finance".to_string(),
                        },
                        FieldOption {
                            value: "other".to_string(),
                            label: "Other".to_string(),
                        },
                    ]),
                    validation: None,
                },
                FieldSpec {
                    id: "comments".to_string(),
                    field_type: FieldType::Textarea,
                    label: "Additional Comments".to_string(),
                    required: None,
                    placeholder: Some("Any other details or questions?".to_string()),
                    options: None,
                    validation: None,
                },
            ],
        }
    }

    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }
}
