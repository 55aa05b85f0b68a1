//! In-process store backend
//!
//! Keeps every table in a `BTreeMap` behind one `RwLock`. Index queries are
//! full scans of the table. No lock is held across an await point.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::backend::{Store, Table};
use super::errors::{StoreError, StoreResult};

type Tables = HashMap<Table, BTreeMap<String, Value>>;

/// In-memory store, for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a table
    pub fn len(&self, table: Table) -> StoreResult<usize> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(&table).map(|t| t.len()).unwrap_or(0))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, table: Table, key: &str) -> StoreResult<Option<Value>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(&table).and_then(|t| t.get(key)).cloned())
    }

    async fn query_index(
        &self,
        table: Table,
        attribute: &str,
        value: &str,
    ) -> StoreResult<Vec<Value>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let Some(rows) = tables.get(&table) else {
            return Ok(Vec::new());
        };

        Ok(rows
            .values()
            .filter(|doc| doc.get(attribute).and_then(Value::as_str) == Some(value))
            .cloned()
            .collect())
    }

    async fn scan(&self, table: Table) -> StoreResult<Vec<Value>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .get(&table)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn put(&self, table: Table, key: &str, document: Value) -> StoreResult<()> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject {
                table,
                key: key.to_string(),
            });
        }

        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        tables
            .entry(table)
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, table: Table, key: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .get_mut(&table)
            .map(|t| t.remove(key).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();

        store
            .put(Table::Users, "u1", json!({ "id": "u1", "username": "alice" }))
            .await
            .unwrap();

        let found = store.get(Table::Users, "u1").await.unwrap();
        assert_eq!(found.unwrap()["username"], "alice");

        // Tables are separate namespaces
        assert!(store.get(Table::Articles, "u1").await.unwrap().is_none());

        assert!(store.delete(Table::Users, "u1").await.unwrap());
        assert!(!store.delete(Table::Users, "u1").await.unwrap());
        assert!(store.get(Table::Users, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryStore::new();
        store.put(Table::Users, "u1", json!({ "v": 1 })).await.unwrap();
        store.put(Table::Users, "u1", json!({ "v": 2 })).await.unwrap();

        assert_eq!(store.len(Table::Users).unwrap(), 1);
        assert_eq!(store.get(Table::Users, "u1").await.unwrap().unwrap()["v"], 2);
    }

    #[tokio::test]
    async fn test_query_index_matches_exact_value() {
        let store = MemoryStore::new();
        store
            .put(Table::Articles, "a1", json!({ "authorId": "u1", "category": "science" }))
            .await
            .unwrap();
        store
            .put(Table::Articles, "a2", json!({ "authorId": "u2", "category": "science" }))
            .await
            .unwrap();
        store
            .put(Table::Articles, "a3", json!({ "authorId": "u1", "category": "culture" }))
            .await
            .unwrap();

        let by_author = store.query_index(Table::Articles, "authorId", "u1").await.unwrap();
        assert_eq!(by_author.len(), 2);

        let by_category = store
            .query_index(Table::Articles, "category", "Science")
            .await
            .unwrap();
        assert!(by_category.is_empty());
    }

    #[tokio::test]
    async fn test_scan_empty_table() {
        let store = MemoryStore::new();
        assert!(store.scan(Table::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_rejected() {
        let store = MemoryStore::new();
        let result = store.put(Table::Users, "u1", json!("text")).await;
        assert!(matches!(result, Err(StoreError::NotAnObject { .. })));
    }
}
