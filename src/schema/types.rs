//! Schema type definitions
//!
//! Supported field types:
//! - string: non-empty UTF-8 string
//! - number: JSON number
//! - boolean: JSON boolean
//! - enum: one of a fixed list of string literals
//! - array: JSON array, optionally with an element type
//!
//! Schemas are compile-time constants. A schema is a name plus an ordered
//! slice of field definitions; validation reports violations in that order.

use super::errors::SchemaError;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Non-empty string (after trimming)
    String,
    /// Any JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// String equal to one of the listed values (case-sensitive)
    Enum(&'static [&'static str]),
    /// Array, with every element checked against the element type if given
    Array(Option<&'static FieldType>),
}

impl FieldType {
    /// Returns the type name for violation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Enum(_) => "enum",
            FieldType::Array(_) => "array",
        }
    }
}

/// One accepted field of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name in the JSON body
    pub name: &'static str,
    /// Field data type
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required field
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    /// Create an optional field
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

/// Named field-to-constraint mapping for one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Endpoint schema name, used in logs
    pub name: &'static str,
    /// Field definitions in declaration order
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Create a new schema
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    /// Looks up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::UnnamedField { schema: self.name });
            }

            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name,
                });
            }

            if let FieldType::Enum(values) = field.field_type {
                if values.is_empty() {
                    return Err(SchemaError::EmptyEnum {
                        schema: self.name,
                        field: field.name,
                    });
                }
            }
        }

        Ok(())
    }
}
