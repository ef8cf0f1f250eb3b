//! Request and response types for the upload and search boundary.
//!
//! These mirror the JSON bodies an HTTP layer exchanges with clients. The
//! crate does not run a server; a host service maps [`RagError`] onto
//! [`ErrorResponse`] with [`RagError::status_code`].

use serde::{Deserialize, Serialize};

use crate::config::RagConfig;
use crate::document::ScoredChunk;
use crate::error::{RagError, Result};

/// An uploaded file, as received by the upload endpoint.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Check the upload against the configured size limit and MIME allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] with a user-readable message.
    pub fn validate(&self, config: &RagConfig) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(RagError::Validation("a file name is required".into()));
        }
        if self.bytes.is_empty() {
            return Err(RagError::Validation("the uploaded file is empty".into()));
        }
        if self.bytes.len() > config.max_upload_bytes {
            return Err(RagError::Validation(format!(
                "file is too large ({} bytes); the limit is {} MB",
                self.bytes.len(),
                config.max_upload_bytes / (1024 * 1024)
            )));
        }
        if !config.accepts_mime_type(&self.content_type) {
            return Err(RagError::Validation(format!(
                "unsupported file type '{}'; expected one of: {}",
                self.content_type,
                config.accepted_mime_types.join(", ")
            )));
        }
        Ok(())
    }
}

/// Successful upload response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub document_id: String,
    pub filename: String,
    pub chunk_count: usize,
}

/// Search request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub document_id: String,
    /// Requested result count; clamped to the configured maximum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,
}

impl SearchRequest {
    /// Reject blank queries and document ids.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(RagError::Validation("query must be a non-empty string".into()));
        }
        if self.document_id.trim().is_empty() {
            return Err(RagError::Validation("documentId must be a non-empty string".into()));
        }
        Ok(())
    }
}

/// Successful search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub chunks: Vec<ScoredChunk>,
    pub chunk_count: usize,
}

/// Error body returned with a 4xx or 5xx status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&RagError> for ErrorResponse {
    fn from(err: &RagError) -> Self {
        match err {
            RagError::Validation(message) => Self { error: message.clone(), details: None },
            RagError::Extraction(e) => Self {
                error: e.kind.user_message().to_string(),
                details: Some(e.kind.as_str().to_string()),
            },
            RagError::NotFound(id) => {
                Self { error: format!("document '{id}' not found"), details: None }
            }
            RagError::Timeout { .. } => {
                Self {
                    error: "the embedding service did not respond in time".into(),
                    details: None,
                }
            }
            // Internal failures are not described to clients.
            _ => Self { error: "internal error".into(), details: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ExtractionError, ExtractionErrorKind};

    fn upload(content_type: &str, len: usize) -> Upload {
        Upload {
            filename: "a.pdf".into(),
            content_type: content_type.into(),
            bytes: vec![b'x'; len],
        }
    }

    #[test]
    fn accepts_pdf_within_limit() {
        assert!(upload("application/pdf", 10).validate(&RagConfig::default()).is_ok());
    }

    #[test]
    fn rejects_wrong_mime_type() {
        let err = upload("image/png", 10).validate(&RagConfig::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn rejects_oversized_upload() {
        let config = RagConfig::builder().max_upload_bytes(8).build().unwrap();
        let err = upload("application/pdf", 9).validate(&config).unwrap_err();
        assert!(matches!(err, RagError::Validation(_)));
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(upload("application/pdf", 0).validate(&RagConfig::default()).is_err());
    }

    #[test]
    fn extraction_errors_carry_details() {
        let err = RagError::from(ExtractionError::new(ExtractionErrorKind::Encrypted, "locked"));
        let body = ErrorResponse::from(&err);
        assert_eq!(err.status_code(), 422);
        assert_eq!(body.details.as_deref(), Some("encrypted"));
    }

    #[test]
    fn search_request_uses_camel_case() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"query":"q","documentId":"d","topK":-2}"#).unwrap();
        assert_eq!(req.document_id, "d");
        assert_eq!(req.top_k, Some(-2));

        let req: SearchRequest = serde_json::from_str(r#"{"query":"q","documentId":"d"}"#).unwrap();
        assert_eq!(req.top_k, None);
    }

    #[test]
    fn search_request_rejects_blank_query() {
        let req = SearchRequest { query: "  ".into(), document_id: "d".into(), top_k: None };
        assert!(req.validate().is_err());
    }

    #[test]
    fn internal_errors_are_not_described() {
        let err = RagError::DimensionMismatch { expected: 2, actual: 3 };
        assert_eq!(ErrorResponse::from(&err).error, "internal error");
    }
}
