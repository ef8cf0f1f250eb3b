//! Text extraction from uploaded document bytes.
//!
//! PDF parsing lives outside this crate. Callers plug a parser in through the
//! [`TextExtractor`] trait, which reports failures as a typed
//! [`ExtractionErrorKind`] so the upload path never has to inspect error text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why text could not be extracted from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionErrorKind {
    /// The bytes are not a well-formed document.
    Corrupted,
    /// The document is password protected.
    Encrypted,
    /// The document parsed but contains no extractable text (e.g. scanned images).
    NoText,
    /// The extractor does not understand this format.
    Unsupported,
}

impl ExtractionErrorKind {
    /// A stable label suitable for the `details` field of an error response.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionErrorKind::Corrupted => "corrupted",
            ExtractionErrorKind::Encrypted => "encrypted",
            ExtractionErrorKind::NoText => "no_text",
            ExtractionErrorKind::Unsupported => "unsupported",
        }
    }

    /// A user-readable explanation of the failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionErrorKind::Corrupted => "The file appears to be corrupted or unreadable",
            ExtractionErrorKind::Encrypted => "The file is password protected",
            ExtractionErrorKind::NoText => {
                "The file contains no extractable text (it may contain only images)"
            }
            ExtractionErrorKind::Unsupported => "The file format is not supported",
        }
    }
}

impl fmt::Display for ExtractionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified text-extraction failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ExtractionError {
    /// The failure classification.
    pub kind: ExtractionErrorKind,
    /// Extractor-specific detail.
    pub message: String,
}

impl ExtractionError {
    /// Create a new extraction error.
    pub fn new(kind: ExtractionErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

/// Converts raw document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of `bytes`.
    fn extract(&self, bytes: &[u8]) -> std::result::Result<String, ExtractionError>;
}

/// Treats the upload as UTF-8 text.
///
/// Useful for plain-text uploads and for exercising the ingestion path in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> std::result::Result<String, ExtractionError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ExtractionError::new(ExtractionErrorKind::Corrupted, format!("invalid UTF-8: {e}"))
        })?;
        if text.trim().is_empty() {
            return Err(ExtractionError::new(
                ExtractionErrorKind::NoText,
                "document contains only whitespace",
            ));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_passed_through() {
        let text = PlainTextExtractor.extract(b"hello world").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn classifies_invalid_utf8_as_corrupted() {
        let err = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::Corrupted);
    }

    #[test]
    fn classifies_blank_input_as_no_text() {
        let err = PlainTextExtractor.extract(b" \n\t ").unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NoText);
        assert_eq!(err.kind.as_str(), "no_text");
    }
}
