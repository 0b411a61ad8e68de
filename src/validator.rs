//! Schema validation - parses raw text and checks it against the
//! FormSchema contract.
//!
//! Produces either a validated [`FormSchema`] or an ordered list of
//! errors, one per violated structural rule. The previous schema stays
//! live at the call site until validation succeeds.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{SchemaError, ValidateError};
use crate::types::{json_type_name, FieldType, FormSchema, FIELD_TYPES};

/// Parse raw text and validate it against the FormSchema contract.
///
/// # Errors
///
/// Returns `ValidateError::UnexpectedEof` for empty/truncated input,
/// `ValidateError::Parse` for other malformed JSON (single message with
/// a position hint), or `ValidateError::Invalid` with one `SchemaError`
/// per violated rule.
pub fn parse_schema(text: &str) -> Result<FormSchema, ValidateError> {
    let value: Value = serde_json::from_str(text).map_err(|source| {
        if source.is_eof() {
            ValidateError::UnexpectedEof
        } else {
            ValidateError::Parse { source }
        }
    })?;

    let errors = check_structure(&value);
    if !errors.is_empty() {
        return Err(ValidateError::Invalid { errors });
    }

    serde_json::from_value(value).map_err(|source| ValidateError::Parse { source })
}

/// Check a parsed document against the FormSchema contract.
///
/// Returns one error per violated rule, in document order. An empty
/// object lists every missing required top-level key.
pub fn check_structure(root: &Value) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    let Some(map) = root.as_object() else {
        errors.push(SchemaError {
            path: String::new(),
            message: format!("Expected object, received {}", json_type_name(root)),
        });
        return errors;
    };

    check_required_string(map, "formTitle", &mut errors);
    check_required_string(map, "formDescription", &mut errors);

    match map.get("fields") {
        None | Some(Value::Null) => errors.push(required("fields")),
        Some(Value::Array(items)) => {
            let mut seen_ids: Vec<&str> = Vec::new();
            for (index, item) in items.iter().enumerate() {
                check_field(item, index, &mut seen_ids, &mut errors);
            }
        }
        Some(other) => errors.push(expected("fields", "array", other)),
    }

    errors
}

fn required(path: impl Into<String>) -> SchemaError {
    SchemaError {
        path: path.into(),
        message: "Required".to_string(),
    }
}

fn expected(path: impl Into<String>, want: &str, got: &Value) -> SchemaError {
    SchemaError {
        path: path.into(),
        message: format!("Expected {}, received {}", want, json_type_name(got)),
    }
}

fn check_required_string(map: &Map<String, Value>, key: &str, errors: &mut Vec<SchemaError>) {
    match map.get(key) {
        None | Some(Value::Null) => errors.push(required(key)),
        Some(Value::String(_)) => {}
        Some(other) => errors.push(expected(key, "string", other)),
    }
}

fn check_optional_string(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<SchemaError>,
) {
    match map.get(key) {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(other) => errors.push(expected(format!("{}.{}", path, key), "string", other)),
    }
}

/// Check a single entry of the `fields` array.
fn check_field<'a>(
    item: &'a Value,
    index: usize,
    seen_ids: &mut Vec<&'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let path = format!("fields.{}", index);

    let Some(map) = item.as_object() else {
        errors.push(expected(path, "object", item));
        return;
    };

    // id: required string, unique within the schema
    match map.get("id") {
        None | Some(Value::Null) => errors.push(required(format!("{}.id", path))),
        Some(Value::String(id)) => {
            if seen_ids.contains(&id.as_str()) {
                errors.push(SchemaError {
                    path: format!("{}.id", path),
                    message: format!("Duplicate field id '{}'", id),
                });
            } else {
                seen_ids.push(id);
            }
        }
        Some(other) => errors.push(expected(format!("{}.id", path), "string", other)),
    }

    // type: required, must name a known control. Unknown types are
    // rejected here rather than silently dropped at render time.
    let field_type = match map.get("type") {
        None | Some(Value::Null) => {
            errors.push(required(format!("{}.type", path)));
            None
        }
        Some(Value::String(s)) => {
            let parsed = FieldType::parse(s);
            if parsed.is_none() {
                let expected_list = FIELD_TYPES
                    .iter()
                    .map(|t| format!("'{}'", t))
                    .collect::<Vec<_>>()
                    .join(" | ");
                errors.push(SchemaError {
                    path: format!("{}.type", path),
                    message: format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        expected_list, s
                    ),
                });
            }
            parsed
        }
        Some(other) => {
            errors.push(expected(format!("{}.type", path), "string", other));
            None
        }
    };

    check_required_string_at(map, "label", &path, errors);

    match map.get("required") {
        None | Some(Value::Null) | Some(Value::Bool(_)) => {}
        Some(other) => errors.push(expected(format!("{}.required", path), "boolean", other)),
    }

    check_optional_string(map, "placeholder", &path, errors);

    check_options(map, field_type, &path, errors);
    check_validation(map, &path, errors);
}

fn check_required_string_at(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<SchemaError>,
) {
    match map.get(key) {
        None | Some(Value::Null) => errors.push(required(format!("{}.{}", path, key))),
        Some(Value::String(_)) => {}
        Some(other) => errors.push(expected(format!("{}.{}", path, key), "string", other)),
    }
}

/// Check the `options` array. Required and non-empty for select/radio.
fn check_options(
    map: &Map<String, Value>,
    field_type: Option<FieldType>,
    path: &str,
    errors: &mut Vec<SchemaError>,
) {
    let options_path = format!("{}.options", path);
    let needs_options = field_type.map(|t| t.expects_options()).unwrap_or(false);

    match map.get("options") {
        None | Some(Value::Null) => {
            if needs_options {
                errors.push(required(options_path));
            }
        }
        Some(Value::Array(items)) => {
            if needs_options && items.is_empty() {
                errors.push(SchemaError {
                    path: options_path.clone(),
                    message: "At least one option is required".to_string(),
                });
            }
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}.{}", options_path, i);
                let Some(option) = item.as_object() else {
                    errors.push(expected(item_path, "object", item));
                    continue;
                };
                check_required_string_at(option, "value", &item_path, errors);
                check_required_string_at(option, "label", &item_path, errors);
            }
        }
        Some(other) => errors.push(expected(options_path, "array", other)),
    }
}

/// Check the `validation` rule. The pattern must compile here so the
/// descriptor mapper can compile it once per schema change without
/// failing on user keystrokes.
fn check_validation(map: &Map<String, Value>, path: &str, errors: &mut Vec<SchemaError>) {
    let validation = match map.get("validation") {
        None | Some(Value::Null) => return,
        Some(Value::Object(v)) => v,
        Some(other) => {
            errors.push(expected(format!("{}.validation", path), "object", other));
            return;
        }
    };

    let validation_path = format!("{}.validation", path);
    match validation.get("pattern") {
        None | Some(Value::Null) => {}
        Some(Value::String(pattern)) => {
            if Regex::new(pattern).is_err() {
                errors.push(SchemaError {
                    path: format!("{}.pattern", validation_path),
                    message: "Invalid regular expression".to_string(),
                });
            }
        }
        Some(other) => errors.push(expected(
            format!("{}.pattern", validation_path),
            "string",
            other,
        )),
    }

    check_optional_string(validation, "message", &validation_path, errors);
}
