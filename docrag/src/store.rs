//! Document store trait for registering and looking up ingested documents.

use async_trait::async_trait;

use crate::document::{Chunk, Document};
use crate::error::Result;

/// A registry of ingested documents keyed by id.
///
/// Lookups return `Option` rather than failing: an unknown id is a normal
/// outcome. The store owns its documents and hands out snapshots.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{DocumentStore, InMemoryDocumentStore};
///
/// let store = InMemoryDocumentStore::new();
/// store.store_document("doc1", "report.pdf", chunks).await?;
/// let doc = store.get_document("doc1").await;
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or overwrite the document `id`, stamping it with the current time.
    ///
    /// Returns the stored record.
    async fn store_document(&self, id: &str, filename: &str, chunks: Vec<Chunk>)
    -> Result<Document>;

    /// Fetch a snapshot of the document `id`.
    async fn get_document(&self, id: &str) -> Option<Document>;

    /// Remove the document `id`. Returns whether it existed.
    async fn delete_document(&self, id: &str) -> bool;

    /// Snapshot of every stored document, in no particular order.
    async fn all_documents(&self) -> Vec<Document>;

    /// Remove every document.
    async fn clear_all(&self);

    /// Number of stored documents.
    async fn len(&self) -> usize;

    /// Whether the store holds no documents.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
