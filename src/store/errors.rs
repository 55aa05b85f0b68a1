//! # Store Errors
//!
//! Every store failure is a server-side fault. Callers surface it as an
//! internal error; retrying is left to the client.

use thiserror::Error;

use super::backend::Table;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A lock guarding in-process state was poisoned
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// A stored document could not be decoded into its record type
    #[error("Corrupt document in {table}/{key}: {reason}")]
    Corrupt {
        table: Table,
        key: String,
        reason: String,
    },

    /// A record could not be encoded into a document
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Documents must be JSON objects
    #[error("Document for {table}/{key} is not an object")]
    NotAnObject { table: Table, key: String },

    /// Backend-specific failure
    #[error("Store backend error: {0}")]
    Backend(String),
}
