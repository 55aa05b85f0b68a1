//! Schema validation for request bodies
//!
//! Every endpoint that accepts input declares a static schema. Handlers
//! validate the raw JSON body against it before deserializing into a typed
//! request.
//!
//! # Design Principles
//!
//! - Schemas are compile-time constants
//! - Validation is pure and total: every field is checked
//! - All violations are reported at once, in field declaration order
//! - Undeclared fields are ignored

mod endpoints;
mod errors;
mod types;
mod validator;

pub use endpoints::{
    ALL as ENDPOINT_SCHEMAS, ARTICLE_STATUSES, CATEGORIES, CREATE_ARTICLE, DELETE_ARTICLE,
    GET_ARTICLE, LIST_ARTICLES, MODERATE_ARTICLE, MODERATE_USER, ROLES, SIGN_IN, SIGN_UP,
    UPDATE_ARTICLE, UPDATE_SETTINGS,
};
pub use errors::{SchemaError, Violation};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::{
    format_violations, is_valid_email, is_valid_string, is_valid_username, validate,
};
