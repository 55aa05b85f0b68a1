//! Store backend interface
//!
//! A key-value/document store with string keys, JSON object documents, and
//! equality lookups on top-level attributes (secondary indexes).

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};

/// Tables known to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Articles,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Articles => "articles",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store backend interface
///
/// Every operation is a single suspension point. There are no transactions
/// spanning multiple calls.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch one document by primary key
    async fn get(&self, table: Table, key: &str) -> StoreResult<Option<Value>>;

    /// Fetch all documents whose top-level string `attribute` equals `value`
    async fn query_index(&self, table: Table, attribute: &str, value: &str)
        -> StoreResult<Vec<Value>>;

    /// Fetch every document in a table
    async fn scan(&self, table: Table) -> StoreResult<Vec<Value>>;

    /// Insert or replace a document
    async fn put(&self, table: Table, key: &str, document: Value) -> StoreResult<()>;

    /// Delete a document, returning whether it existed
    async fn delete(&self, table: Table, key: &str) -> StoreResult<bool>;
}

/// Encode a record as a store document
pub fn encode<T: Serialize>(table: Table, key: &str, record: &T) -> StoreResult<Value> {
    let value =
        serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    if !value.is_object() {
        return Err(StoreError::NotAnObject {
            table,
            key: key.to_string(),
        });
    }
    Ok(value)
}

/// Decode a store document into a record
pub fn decode<T: DeserializeOwned>(table: Table, key: &str, document: Value) -> StoreResult<T> {
    serde_json::from_value(document).map_err(|e| StoreError::Corrupt {
        table,
        key: key.to_string(),
        reason: e.to_string(),
    })
}
