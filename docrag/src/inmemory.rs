//! In-memory document store.
//!
//! This module provides [`InMemoryDocumentStore`], a document registry backed
//! by a `HashMap` protected by a `tokio::sync::RwLock`. Contents live for the
//! lifetime of the process. Separate processes never see each other's
//! documents, so a multi-instance deployment must route a document's uploads
//! and queries to the same instance.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};
use crate::store::DocumentStore;

/// An in-memory [`DocumentStore`].
///
/// Construct one per service (or per test) and share it through an `Arc`.
/// Each trait method takes the lock for a single map operation.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docrag::{DocumentStore, InMemoryDocumentStore};
///
/// let store = Arc::new(InMemoryDocumentStore::new());
/// store.store_document("doc1", "notes.pdf", chunks).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check that every chunk shares the first chunk's embedding dimensionality.
fn check_dimensions(chunks: &[Chunk]) -> Result<()> {
    let Some(first) = chunks.first() else {
        return Ok(());
    };
    let expected = first.embedding.len();
    match chunks.iter().find(|c| c.embedding.len() != expected) {
        Some(chunk) => Err(RagError::DimensionMismatch { expected, actual: chunk.embedding.len() }),
        None => Ok(()),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store_document(
        &self,
        id: &str,
        filename: &str,
        chunks: Vec<Chunk>,
    ) -> Result<Document> {
        check_dimensions(&chunks)?;

        let document = Document {
            id: id.to_string(),
            filename: filename.to_string(),
            chunks,
            created_at: Utc::now(),
        };

        let mut documents = self.documents.write().await;
        let replaced = documents.insert(id.to_string(), document.clone()).is_some();
        debug!(document.id = id, replaced, chunk_count = document.chunks.len(), "stored document");
        Ok(document)
    }

    async fn get_document(&self, id: &str) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }

    async fn delete_document(&self, id: &str) -> bool {
        self.documents.write().await.remove(id).is_some()
    }

    async fn all_documents(&self) -> Vec<Document> {
        self.documents.read().await.values().cloned().collect()
    }

    async fn clear_all(&self) {
        self.documents.write().await.clear();
    }

    async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}
