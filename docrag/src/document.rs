//! Data types for documents, chunks, and retrieval results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A segment of a [`Document`] with its vector embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk, `{document_id}_{index}` when produced by ingestion.
    pub id: String,
    /// The text content of the chunk. Never empty.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a chunk from its parts.
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self { id: id.into(), text: text.into(), embedding }
    }

    /// Build the id of the chunk at `index` within `document_id`.
    pub fn id_for(document_id: &str, index: usize) -> String {
        format!("{document_id}_{index}")
    }
}

/// An ingested document owned by a [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier within the store.
    pub id: String,
    /// Display name of the source file.
    pub filename: String,
    /// Chunks in source text order.
    pub chunks: Vec<Chunk>,
    /// When the document was stored.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Generate a fresh document id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Embedding dimensionality shared by this document's chunks, if it has any.
    pub fn dimensions(&self) -> Option<usize> {
        self.chunks.first().map(|c| c.embedding.len())
    }
}

/// A chunk paired with its similarity to a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredChunk {
    /// The chunk id.
    pub id: String,
    /// The chunk text.
    pub text: String,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub similarity: f32,
}

/// One retrieved passage inside a [`RagContext`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextChunk {
    /// The passage text.
    pub text: String,
    /// Cosine similarity to the query.
    pub similarity: f32,
}

impl From<ScoredChunk> for ContextChunk {
    fn from(scored: ScoredChunk) -> Self {
        Self { text: scored.text, similarity: scored.similarity }
    }
}

/// Retrieved passages for one query against one document.
///
/// Built per query and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RagContext {
    /// The document the passages came from.
    pub document_id: String,
    /// The document's display name.
    pub filename: String,
    /// Passages in descending similarity order.
    pub relevant_chunks: Vec<ContextChunk>,
}
