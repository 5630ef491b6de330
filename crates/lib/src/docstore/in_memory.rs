//! In-memory document store implementation
//!
//! Reference implementation of the [`DocumentStore`] boundary, suitable for
//! testing, development, or scenarios where profile persistence is handled
//! externally. Collections are `BTreeMap`s so query results come back in
//! stable id order.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentStore};
use crate::Result;

/// A simple in-memory document store backed by nested maps.
#[derive(Debug, Default)]
pub struct InMemory {
    /// collection name -> (record id -> document)
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl InMemory {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Check whether a collection has no records.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for InMemory {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        document: Document,
        merge: bool,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection.to_string()).or_default();

        if merge {
            let existing = records.entry(id.to_string()).or_default();
            for (field, value) in document {
                existing.insert(field, value);
            }
        } else {
            records.insert(id.to_string(), document);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(records) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(records
            .values()
            .filter(|record| record.get(field) == Some(value))
            .cloned()
            .collect())
    }
}
