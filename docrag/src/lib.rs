//! # docrag
//!
//! Retrieval-augmented generation over uploaded documents.
//!
//! Text extracted from a document is split into word-bounded chunks, each
//! chunk is embedded through an [`EmbeddingProvider`], and the result is kept
//! in a [`DocumentStore`]. At question time the query is embedded, chunks are
//! ranked by cosine similarity, and the best matches are packaged as a
//! [`RagContext`] that [`format_rag_context`] renders for a model prompt.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{InMemoryDocumentStore, RagPipeline, format_rag_context};
//!
//! let pipeline = RagPipeline::builder()
//!     .embedding_provider(Arc::new(embedder))
//!     .document_store(Arc::new(InMemoryDocumentStore::new()))
//!     .build()?;
//!
//! let doc = pipeline.ingest_text("doc1", "guide.pdf", &text).await?;
//! let context = pipeline.get_rag_context("how do I reset it?", &doc.id, Some(3)).await;
//! let prompt = format_rag_context(context.as_ref());
//! ```
//!
//! ## Features
//!
//! - `openai` — [`openai::OpenAIEmbeddingProvider`] backed by the OpenAI embeddings API.

pub mod api;
pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extraction;
pub mod inmemory;
pub mod pipeline;
pub mod similarity;
pub mod store;

#[cfg(feature = "openai")]
pub mod openai;

pub use api::{ErrorResponse, IngestResponse, SearchRequest, SearchResponse, Upload};
pub use chunking::{Chunker, WordChunker, chunk_text};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::format_rag_context;
pub use document::{Chunk, ContextChunk, Document, RagContext, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use extraction::{ExtractionError, ExtractionErrorKind, PlainTextExtractor, TextExtractor};
pub use inmemory::InMemoryDocumentStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use similarity::{MAX_TOP_K, clamp_top_k, cosine_similarity, find_similar_chunks};
pub use store::DocumentStore;
