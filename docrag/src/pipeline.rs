//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the ingest and retrieval workflows by
//! composing an [`EmbeddingProvider`], a [`DocumentStore`], and a [`Chunker`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{InMemoryDocumentStore, RagConfig, RagPipeline, format_rag_context};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .document_store(Arc::new(InMemoryDocumentStore::new()))
//!     .build()?;
//!
//! pipeline.ingest_text("doc1", "handbook.pdf", &text).await?;
//! let context = pipeline.get_rag_context("what is the leave policy?", "doc1", None).await;
//! let prompt_section = format_rag_context(context.as_ref());
//! ```

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::api::{IngestResponse, SearchRequest, SearchResponse, Upload};
use crate::chunking::{Chunker, WordChunker};
use crate::config::RagConfig;
use crate::document::{Chunk, ContextChunk, Document, RagContext};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::extraction::TextExtractor;
use crate::similarity::{clamp_top_k, find_similar_chunks};
use crate::store::DocumentStore;

/// The RAG pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → store) and retrieval
/// (embed → rank → package). Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn DocumentStore>,
    chunker: Arc<dyn Chunker>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the document store.
    pub fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Embed `text`, failing with [`RagError::Timeout`] if the provider takes
    /// longer than the configured deadline.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let after = self.config.embedding_timeout();
        match tokio::time::timeout(after, self.embedding_provider.embed(text)).await {
            Ok(result) => result,
            Err(_) => Err(RagError::Timeout {
                operation: format!("{} embedding", self.embedding_provider.name()),
                after,
            }),
        }
    }

    /// Ingest extracted text: chunk → embed every chunk concurrently → store.
    ///
    /// Ingestion is all-or-nothing: if any embedding call fails or times out,
    /// nothing is stored. An existing document with the same id is replaced.
    ///
    /// # Errors
    ///
    /// - [`RagError::Validation`] if the text yields no chunks
    /// - [`RagError::EmbeddingError`] or [`RagError::Timeout`] from the provider
    /// - [`RagError::DimensionMismatch`] if the provider returns vectors of
    ///   differing lengths
    pub async fn ingest_text(
        &self,
        document_id: &str,
        filename: &str,
        text: &str,
    ) -> Result<Document> {
        let texts = self.chunker.chunk(text);
        if texts.is_empty() {
            return Err(RagError::Validation("the document contains no extractable text".into()));
        }

        debug!(document.id = document_id, chunk_count = texts.len(), "embedding chunks");

        let embeddings =
            try_join_all(texts.iter().map(|t| self.embed(t))).await.inspect_err(|e| {
                error!(document.id = document_id, error = %e, "embedding failed during ingestion");
            })?;

        let chunks: Vec<Chunk> = texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| {
                Chunk::new(Chunk::id_for(document_id, i), text, embedding)
            })
            .collect();

        let document =
            self.store.store_document(document_id, filename, chunks).await.inspect_err(|e| {
                error!(document.id = document_id, error = %e, "store failed during ingestion");
            })?;

        info!(
            document.id = document_id,
            filename,
            chunk_count = document.chunks.len(),
            "ingested document"
        );
        Ok(document)
    }

    /// Handle an upload: validate → extract text → ingest under a fresh id.
    ///
    /// # Errors
    ///
    /// - [`RagError::Validation`] for size or MIME violations
    /// - [`RagError::Extraction`] when no text can be extracted
    /// - any error from [`ingest_text`](Self::ingest_text)
    pub async fn ingest_upload(
        &self,
        upload: &Upload,
        extractor: &dyn TextExtractor,
    ) -> Result<IngestResponse> {
        upload.validate(&self.config).inspect_err(|e| {
            warn!(filename = %upload.filename, error = %e, "rejected upload");
        })?;

        let text = extractor.extract(&upload.bytes).map_err(|e| {
            warn!(filename = %upload.filename, kind = %e.kind, "text extraction failed");
            RagError::from(e)
        })?;

        let document_id = Document::generate_id();
        let document = self.ingest_text(&document_id, &upload.filename, &text).await?;

        Ok(IngestResponse {
            document_id: document.id,
            filename: document.filename,
            chunk_count: document.chunks.len(),
        })
    }

    /// Build prompt context for `query` from the document `document_id`.
    ///
    /// `top_k` defaults to the configured `default_top_k` and is capped at
    /// `max_top_k`. Returns `None`, never an error, when the document is
    /// unknown, has no chunks, or the query cannot be embedded: callers should
    /// carry on without context.
    pub async fn get_rag_context(
        &self,
        query: &str,
        document_id: &str,
        top_k: Option<usize>,
    ) -> Option<RagContext> {
        let Some(document) = self.store.get_document(document_id).await else {
            debug!(document.id = document_id, "no such document");
            return None;
        };
        if document.chunks.is_empty() {
            debug!(document.id = document_id, "document has no chunks");
            return None;
        }

        let query_embedding = match self.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(
                    document.id = document_id,
                    error = %e,
                    "query embedding failed, continuing without context"
                );
                return None;
            }
        };

        let top_k = top_k.unwrap_or(self.config.default_top_k).min(self.config.max_top_k);
        let ranked = match find_similar_chunks(&query_embedding, &document.chunks, top_k) {
            Ok(ranked) => ranked,
            Err(e) => {
                error!(
                    document.id = document_id,
                    error = %e,
                    "ranking failed, continuing without context"
                );
                return None;
            }
        };

        info!(document.id = document_id, result_count = ranked.len(), "retrieved context");

        Some(RagContext {
            document_id: document.id,
            filename: document.filename,
            relevant_chunks: ranked.into_iter().map(ContextChunk::from).collect(),
        })
    }

    /// Run a search request against one document.
    ///
    /// Returns `Ok(None)` when the document is unknown. Unlike
    /// [`get_rag_context`](Self::get_rag_context), embedding failures are
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// - [`RagError::Validation`] for a blank query or document id
    /// - provider errors, timeouts, and dimension mismatches
    pub async fn search(&self, request: &SearchRequest) -> Result<Option<SearchResponse>> {
        request.validate()?;

        let Some(document) = self.store.get_document(&request.document_id).await else {
            return Ok(None);
        };

        let top_k = clamp_top_k(request.top_k, self.config.default_top_k, self.config.max_top_k);
        let chunks = if document.chunks.is_empty() || top_k == 0 {
            Vec::new()
        } else {
            let query_embedding = self.embed(&request.query).await.inspect_err(|e| {
                error!(document.id = %document.id, error = %e, "query embedding failed");
            })?;
            find_similar_chunks(&query_embedding, &document.chunks, top_k)?
        };

        info!(document.id = %document.id, result_count = chunks.len(), "search completed");

        Ok(Some(SearchResponse {
            success: true,
            query: request.query.clone(),
            chunk_count: chunks.len(),
            chunks,
        }))
    }

    /// Fetch a stored document.
    pub async fn document(&self, document_id: &str) -> Option<Document> {
        self.store.get_document(document_id).await
    }

    /// Snapshot of every stored document.
    pub async fn documents(&self) -> Vec<Document> {
        self.store.all_documents().await
    }

    /// Remove a stored document. Returns whether it existed.
    pub async fn delete_document(&self, document_id: &str) -> bool {
        let removed = self.store.delete_document(document_id).await;
        if removed {
            info!(document.id = document_id, "deleted document");
        }
        removed
    }

    /// Remove every stored document.
    pub async fn clear(&self) {
        self.store.clear_all().await;
        info!("cleared document store");
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `embedding_provider` and `document_store` are required. `config` defaults
/// to [`RagConfig::default()`], and `chunker` to a [`WordChunker`] built from
/// the config's chunk sizes.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = RagPipeline::builder()
///     .config(config)
///     .embedding_provider(Arc::new(embedder))
///     .document_store(Arc::new(store))
///     .chunker(Arc::new(chunker))  // optional
///     .build()?;
/// ```
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn DocumentStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the document store.
    pub fn document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`], validating the config and that all required
    /// fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing or the
    /// config fails [`RagConfig::validate`].
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let store = self
            .store
            .ok_or_else(|| RagError::ConfigError("document_store is required".to_string()))?;
        let chunker = self.chunker.unwrap_or_else(|| {
            Arc::new(
                WordChunker::new(config.min_chunk_size, config.max_chunk_size)
                    .with_coalesce_trailing(config.coalesce_trailing),
            )
        });

        Ok(RagPipeline { config, embedding_provider, store, chunker })
    }
}
