//! Schema errors and validation violations
//!
//! A violation is one reason a field fails its schema constraint. The
//! message always names the field so it can be shown to the end user as-is.
//! A `SchemaError` means the schema definition itself is malformed.

use std::fmt;

use thiserror::Error;

/// Malformed schema definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema '{schema}' has an unnamed field")]
    UnnamedField { schema: &'static str },

    #[error("Schema '{schema}' declares field '{field}' twice")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },

    #[error("Schema '{schema}' field '{field}' has no enum values")]
    EmptyEnum {
        schema: &'static str,
        field: &'static str,
    },
}

/// A single reported reason a field fails its constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path (e.g. "tags[2]")
    pub field: String,
    /// Human-readable message naming the field
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{} is required", field);
        Self { field, message }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str) -> Self {
        let field = field.into();
        let message = format!("{} must be {}", field, expected);
        Self { field, message }
    }

    pub fn not_in_enum(field: impl Into<String>, allowed: &[&str]) -> Self {
        let field = field.into();
        let message = format!("{} must be one of: {}", field, allowed.join(", "));
        Self { field, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::DuplicateField {
            schema: "post",
            field: "title",
        };
        assert_eq!(err.to_string(), "Schema 'post' declares field 'title' twice");
    }

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(Violation::missing_field("title").to_string(), "title is required");
        assert_eq!(
            Violation::type_mismatch("tags", "an array").to_string(),
            "tags must be an array"
        );
        assert_eq!(
            Violation::not_in_enum("status", &["draft", "published"]).to_string(),
            "status must be one of: draft, published"
        );
    }
}
