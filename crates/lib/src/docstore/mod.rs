//! Document store boundary
//!
//! Models the external document database that owns profile records. The
//! interface is deliberately small - point reads, merge-aware writes, and an
//! exact-match field query - because that is all the profile collection
//! needs. Records are schemaless JSON objects; typing happens in the gateway.

pub mod errors;
mod in_memory;

pub use errors::StoreError;
pub use in_memory::InMemory;

use async_trait::async_trait;

use crate::Result;

/// A schemaless record as stored in a collection.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The external document store.
///
/// Implementations must be `Send + Sync` so they can be shared behind
/// `Arc<dyn DocumentStore>` across the gateway and the synchronizer's
/// in-flight profile fetches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read by collection and id.
    ///
    /// A missing record is `Ok(None)`, never an error.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Write a record.
    ///
    /// With `merge` set, fields are overlaid onto any existing record;
    /// otherwise the record is replaced wholesale. Creates the record (and
    /// collection) when absent in either mode.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        document: Document,
        merge: bool,
    ) -> Result<()>;

    /// Exact-match scan over one field of a collection.
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>>;
}
