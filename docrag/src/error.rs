//! Error types for the `docrag` crate.

use std::time::Duration;

use thiserror::Error;

use crate::extraction::ExtractionError;

/// Errors that can occur in RAG operations.
///
/// "Not found" and "document has no chunks" are not errors: lookups and
/// retrieval return `Option` for those cases. [`RagError::NotFound`] exists
/// only for callers that need to map an absent value onto a wire response.
#[derive(Debug, Error)]
pub enum RagError {
    /// Bad input shape, oversized upload, or unsupported MIME type.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The text extractor could not produce text from the uploaded bytes.
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Two vectors that must share a dimensionality do not.
    ///
    /// This indicates an embedding-model mismatch and is never user-facing.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the operation expected.
        expected: usize,
        /// The dimensionality it received.
        actual: usize,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An external call did not complete within its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The deadline that elapsed.
        after: Duration,
    },

    /// The referenced document does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RagError {
    /// The HTTP status code a request boundary should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RagError::Validation(_) => 400,
            RagError::NotFound(_) => 404,
            RagError::Extraction(_) => 422,
            RagError::Timeout { .. } => 504,
            RagError::DimensionMismatch { .. }
            | RagError::EmbeddingError { .. }
            | RagError::ConfigError(_) => 500,
        }
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionErrorKind;

    #[test]
    fn every_variant_maps_to_a_status() {
        let cases = [
            (RagError::Validation("bad".into()), 400),
            (RagError::NotFound("doc1".into()), 404),
            (ExtractionError::new(ExtractionErrorKind::Encrypted, "locked").into(), 422),
            (
                RagError::Timeout { operation: "embedding".into(), after: Duration::from_secs(30) },
                504,
            ),
            (RagError::DimensionMismatch { expected: 2, actual: 3 }, 500),
            (RagError::EmbeddingError { provider: "p".into(), message: "m".into() }, 500),
            (RagError::ConfigError("c".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }
}
