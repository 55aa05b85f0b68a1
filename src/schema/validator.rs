//! Request body validation against endpoint schemas
//!
//! Validation semantics:
//! - Every schema field is checked, in declaration order
//! - All violations are collected; validation never stops at the first one
//! - Absent, null, or blank-string values count as missing
//! - Fields not declared in the schema are ignored
//! - No coercion, no defaults, no mutation of the input

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::errors::Violation;
use super::types::{FieldType, Schema};

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_]{3,32}$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Validates an input object against a schema.
///
/// Returns every violation in schema field order; an empty vector means the
/// input is valid. A non-object input is treated as an object with no fields.
pub fn validate(input: &Value, schema: &Schema) -> Vec<Violation> {
    let obj = input.as_object();
    let mut violations = Vec::new();

    for field in schema.fields {
        let value = obj.and_then(|o| o.get(field.name));

        if is_missing(value) {
            if field.required {
                violations.push(Violation::missing_field(field.name));
            }
            // Optional blank strings are still type-checked below
            match value {
                Some(Value::String(_)) if !field.required => {}
                _ => continue,
            }
        }

        if let Some(value) = value {
            check_value(value, &field.field_type, field.name, &mut violations);
        }
    }

    violations
}

impl Schema {
    /// Validates an input object against this schema
    pub fn validate(&self, input: &Value) -> Vec<Violation> {
        validate(input, self)
    }
}

/// Returns true if the value is a string with non-whitespace content
pub fn is_valid_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

/// Returns true if the username is 3-32 letters, digits, or underscores
pub fn is_valid_username(username: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(USERNAME_PATTERN).expect("Invalid regex constant"))
        .is_match(username)
}

/// Returns true if the address has the shape `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid regex constant"))
        .is_match(email)
}

/// Format checks for account fields, run after schema validation.
///
/// Only fields the schema declares are checked, and only when present and
/// non-blank, so a missing field is reported once, by the schema.
pub fn format_violations(input: &Value, schema: &Schema) -> Vec<Violation> {
    let mut violations = Vec::new();
    let declared = |name: &str| {
        schema
            .field(name)
            .and_then(|_| input.get(name))
            .and_then(Value::as_str)
    };

    if let Some(username) = declared("username") {
        if !username.trim().is_empty() && !is_valid_username(username) {
            violations.push(Violation::new(
                "username",
                "username must be 3-32 letters, digits or underscores",
            ));
        }
    }

    if let Some(email) = declared("email") {
        if !email.trim().is_empty() && !is_valid_email(email.trim()) {
            violations.push(Violation::new("email", "email must be a valid email address"));
        }
    }

    violations
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_value(value: &Value, expected: &FieldType, path: &str, out: &mut Vec<Violation>) {
    match expected {
        FieldType::String => {
            if !is_valid_string(Some(value)) {
                out.push(Violation::type_mismatch(path, "a non-empty string"));
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                out.push(Violation::type_mismatch(path, "a number"));
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                out.push(Violation::type_mismatch(path, "a boolean"));
            }
        }
        FieldType::Enum(allowed) => {
            let matched = value
                .as_str()
                .map(|s| allowed.contains(&s))
                .unwrap_or(false);
            if !matched {
                out.push(Violation::not_in_enum(path, allowed));
            }
        }
        FieldType::Array(element_type) => {
            let Some(items) = value.as_array() else {
                out.push(Violation::type_mismatch(path, "an array"));
                return;
            };

            if let Some(element_type) = element_type {
                for (i, item) in items.iter().enumerate() {
                    let elem_path = format!("{}[{}]", path, i);
                    check_value(item, element_type, &elem_path, out);
                }
            }
        }
    }
}
