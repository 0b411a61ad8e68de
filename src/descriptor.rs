//! Field descriptor mapping - compiles a validated schema into
//! renderable field descriptors.
//!
//! Pattern rules are compiled exactly once per schema change, not per
//! keystroke. `FieldType` is a closed enum, so the mapping is total:
//! there is no silent-drop arm for unknown types.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::error::{SchemaError, ValidateError};
use crate::types::{FieldOption, FieldSpec, FieldType, FormSchema};

/// A validated schema with its descriptors and compiled pattern rules.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: FormSchema,
    descriptors: Vec<FieldDescriptor>,
    patterns: HashMap<String, Regex>,
}

impl CompiledSchema {
    /// Compile a validated schema into field descriptors.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError::Invalid` if a `validation.pattern` fails
    /// to compile. Schemas from [`crate::validator::parse_schema`] have
    /// already had their patterns checked.
    pub fn compile(schema: FormSchema) -> Result<Self, ValidateError> {
        let mut descriptors = Vec::with_capacity(schema.fields.len());
        let mut patterns = HashMap::new();
        let mut errors = Vec::new();

        for (index, field) in schema.fields.iter().enumerate() {
            // Patterns constrain free-text entry only (text/email).
            let pattern = field
                .pattern_source()
                .filter(|_| field.field_type.is_text_entry());

            if let Some(source) = pattern {
                match Regex::new(source) {
                    Ok(regex) => {
                        patterns.insert(field.id.clone(), regex);
                    }
                    Err(_) => errors.push(SchemaError {
                        path: format!("fields.{}.validation.pattern", index),
                        message: "Invalid regular expression".to_string(),
                    }),
                }
            }

            descriptors.push(FieldDescriptor::from_spec(field));
        }

        if !errors.is_empty() {
            return Err(ValidateError::Invalid { errors });
        }

        Ok(CompiledSchema {
            schema,
            descriptors,
            patterns,
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Descriptors in schema field order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// The compiled pattern for a field, if it has one.
    pub fn pattern(&self, id: &str) -> Option<&Regex> {
        self.patterns.get(id)
    }

    /// The renderable view of the schema, for serialization.
    pub fn rendered(&self) -> RenderedForm<'_> {
        RenderedForm {
            form_title: &self.schema.form_title,
            form_description: &self.schema.form_description,
            fields: &self.descriptors,
        }
    }
}

/// The rendered form surface: title, description, and field controls.
#[derive(Debug, Serialize)]
pub struct RenderedForm<'a> {
    #[serde(rename = "formTitle")]
    pub form_title: &'a str,
    #[serde(rename = "formDescription")]
    pub form_description: &'a str,
    pub fields: &'a [FieldDescriptor],
}

/// One renderable field: the control kind plus its display attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Pattern source for text/email controls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Inline message shown when the field fails validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub control: Control,
}

impl FieldDescriptor {
    fn from_spec(field: &FieldSpec) -> Self {
        let options = field.options.clone().unwrap_or_default();
        let control = match field.field_type {
            FieldType::Text => Control::Text,
            FieldType::Email => Control::Email,
            FieldType::Textarea => Control::Textarea,
            FieldType::Select => Control::Select { options },
            FieldType::Radio => Control::Radio { options },
        };

        FieldDescriptor {
            id: field.id.clone(),
            label: field.label.clone(),
            required: field.is_required(),
            placeholder: field.placeholder.clone(),
            pattern: field
                .pattern_source()
                .filter(|_| field.field_type.is_text_entry())
                .map(str::to_string),
            message: field
                .validation
                .as_ref()
                .and_then(|v| v.message.clone()),
            control,
        }
    }
}

/// The input control a field maps to, in schema order:
/// text/email are single-line, textarea multi-line, select an
/// enumerated choice (first option implicitly selected), radio a
/// mutually exclusive group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    Text,
    Email,
    Textarea,
    Select { options: Vec<FieldOption> },
    Radio { options: Vec<FieldOption> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::parse_schema;
    use serde_json::json;

    fn compile_text(text: &str) -> CompiledSchema {
        CompiledSchema::compile(parse_schema(text).unwrap()).unwrap()
    }

    #[test]
    fn descriptors_follow_schema_order() {
        let compiled = CompiledSchema::compile(FormSchema::sample()).unwrap();
        let ids: Vec<_> = compiled.descriptors().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["name", "email", "companySize", "industry", "comments"]
        );
    }

    #[test]
    fn text_pattern_compiled_once_per_schema() {
        let text = json!({
            "formTitle": "T",
            "formDescription": "D",
            "fields": [
                {
                    "id": "name",
                    "type": "text",
                    "label": "Name",
                    "validation": { "pattern": "^[a-zA-Z ]+$" }
                }
            ]
        })
        .to_string();
        let compiled = compile_text(&text);

        let regex = compiled.pattern("name").unwrap();
        assert!(regex.is_match("Sajal Gupta"));
        assert!(!regex.is_match("123"));
    }

    #[test]
    fn pattern_ignored_for_non_text_controls() {
        let text = json!({
            "formTitle": "T",
            "formDescription": "D",
            "fields": [
                {
                    "id": "bio",
                    "type": "textarea",
                    "label": "Bio",
                    "validation": { "pattern": "^.{10,}$" }
                }
            ]
        })
        .to_string();
        let compiled = compile_text(&text);

        assert!(compiled.pattern("bio").is_none());
        assert!(compiled.descriptors()[0].pattern.is_none());
    }

    #[test]
    fn select_control_carries_options_in_order() {
        let compiled = CompiledSchema::compile(FormSchema::sample()).unwrap();
        let size = &compiled.descriptors()[2];
        match &size.control {
            Control::Select { options } => {
                assert_eq!(options[0].value, "1-50");
                assert_eq!(options.len(), 3);
            }
            other => panic!("expected select control, got {:?}", other),
        }
    }

    #[test]
    fn control_serializes_with_kind_tag() {
        let compiled = CompiledSchema::compile(FormSchema::sample()).unwrap();
        let value = serde_json::to_value(compiled.rendered()).unwrap();
        assert_eq!(value["fields"][0]["control"]["kind"], "text");
        assert_eq!(value["fields"][3]["control"]["kind"], "radio");
        assert_eq!(value["formTitle"], "Project Requirements Survey");
    }

    #[test]
    fn invalid_pattern_fails_compile() {
        let schema = FormSchema {
            form_title: "T".into(),
            form_description: "D".into(),
            fields: vec![FieldSpec {
                id: "x".into(),
                field_type: FieldType::Text,
                label: "X".into(),
                required: None,
                placeholder: None,
                options: None,
                validation: Some(crate::types::ValidationRule {
                    pattern: Some("([".into()),
                    message: None,
                }),
            }],
        };
        let result = CompiledSchema::compile(schema);
        assert!(matches!(result, Err(ValidateError::Invalid { .. })));
    }

    #[test]
    fn descriptor_carries_custom_message() {
        let compiled = CompiledSchema::compile(FormSchema::sample()).unwrap();
        assert_eq!(
            compiled.descriptors()[0].message.as_deref(),
            Some("Name may only contain letters and spaces")
        );
    }
}
