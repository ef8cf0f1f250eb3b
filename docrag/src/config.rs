//! Configuration for the RAG pipeline.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chunking::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE};
use crate::error::{RagError, Result};
use crate::similarity::MAX_TOP_K;

/// Prefix for environment variables read by [`RagConfig::from_env`].
pub const ENV_PREFIX: &str = "DOCRAG_";

/// Configuration parameters for the RAG pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    /// Advisory minimum chunk size in characters.
    pub min_chunk_size: usize,
    /// Maximum chunk size in characters.
    pub max_chunk_size: usize,
    /// Merge a final chunk shorter than `min_chunk_size` into its predecessor.
    pub coalesce_trailing: bool,
    /// Number of chunks retrieved when the caller does not ask for a count.
    pub default_top_k: usize,
    /// Upper bound on the number of chunks a single retrieval returns.
    pub max_top_k: usize,
    /// Deadline for each embedding-provider call, in seconds.
    pub embedding_timeout_secs: u64,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
    /// MIME types accepted by the upload path.
    pub accepted_mime_types: Vec<String>,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            coalesce_trailing: false,
            default_top_k: 3,
            max_top_k: MAX_TOP_K,
            embedding_timeout_secs: 30,
            max_upload_bytes: 50 * 1024 * 1024,
            accepted_mime_types: vec!["application/pdf".to_string()],
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Build a validated config from defaults overlaid with `DOCRAG_*` environment variables.
    ///
    /// Recognised variables: `DOCRAG_MIN_CHUNK_SIZE`, `DOCRAG_MAX_CHUNK_SIZE`,
    /// `DOCRAG_COALESCE_TRAILING`, `DOCRAG_DEFAULT_TOP_K`, `DOCRAG_MAX_TOP_K`,
    /// `DOCRAG_EMBEDDING_TIMEOUT_SECS`, `DOCRAG_MAX_UPLOAD_BYTES`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a variable cannot be parsed or the
    /// resulting config is inconsistent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(v) = parse_var(&lookup, "MIN_CHUNK_SIZE")? {
            builder = builder.min_chunk_size(v);
        }
        if let Some(v) = parse_var(&lookup, "MAX_CHUNK_SIZE")? {
            builder = builder.max_chunk_size(v);
        }
        if let Some(v) = parse_var(&lookup, "COALESCE_TRAILING")? {
            builder = builder.coalesce_trailing(v);
        }
        if let Some(v) = parse_var(&lookup, "DEFAULT_TOP_K")? {
            builder = builder.default_top_k(v);
        }
        if let Some(v) = parse_var(&lookup, "MAX_TOP_K")? {
            builder = builder.max_top_k(v);
        }
        if let Some(v) = parse_var(&lookup, "EMBEDDING_TIMEOUT_SECS")? {
            builder = builder.embedding_timeout(Duration::from_secs(v));
        }
        if let Some(v) = parse_var(&lookup, "MAX_UPLOAD_BYTES")? {
            builder = builder.max_upload_bytes(v);
        }
        builder.build()
    }

    /// Check that the parameters are consistent.
    ///
    /// Builders call this for you; call it directly on configs obtained by
    /// deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `max_chunk_size == 0`
    /// - `min_chunk_size > max_chunk_size`
    /// - `max_top_k` is zero or above [`MAX_TOP_K`]
    /// - `default_top_k > max_top_k`
    /// - the embedding timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(RagError::ConfigError("max_chunk_size must be greater than zero".into()));
        }
        if self.min_chunk_size > self.max_chunk_size {
            return Err(RagError::ConfigError(format!(
                "min_chunk_size ({}) must not exceed max_chunk_size ({})",
                self.min_chunk_size, self.max_chunk_size
            )));
        }
        if self.max_top_k == 0 || self.max_top_k > MAX_TOP_K {
            return Err(RagError::ConfigError(format!(
                "max_top_k ({}) must be between 1 and {MAX_TOP_K}",
                self.max_top_k
            )));
        }
        if self.default_top_k > self.max_top_k {
            return Err(RagError::ConfigError(format!(
                "default_top_k ({}) must not exceed max_top_k ({})",
                self.default_top_k, self.max_top_k
            )));
        }
        if self.embedding_timeout_secs == 0 {
            return Err(RagError::ConfigError(
                "embedding timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// Deadline for each embedding-provider call.
    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_secs(self.embedding_timeout_secs)
    }

    /// Whether `mime_type` is on the upload allow-list.
    ///
    /// Parameters such as `; charset=binary` are ignored and the comparison is
    /// case-insensitive.
    pub fn accepts_mime_type(&self, mime_type: &str) -> bool {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        self.accepted_mime_types.iter().any(|m| m.eq_ignore_ascii_case(essence))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{ENV_PREFIX}{name}");
    match lookup(&key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| RagError::ConfigError(format!("invalid value for {key} ({raw:?}): {e}"))),
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the advisory minimum chunk size in characters.
    pub fn min_chunk_size(mut self, size: usize) -> Self {
        self.config.min_chunk_size = size;
        self
    }

    /// Set the maximum chunk size in characters.
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.config.max_chunk_size = size;
        self
    }

    /// Enable or disable merging of a short final chunk.
    pub fn coalesce_trailing(mut self, coalesce: bool) -> Self {
        self.config.coalesce_trailing = coalesce;
        self
    }

    /// Set the number of chunks retrieved by default.
    pub fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Set the upper bound on retrieved chunks.
    pub fn max_top_k(mut self, k: usize) -> Self {
        self.config.max_top_k = k;
        self
    }

    /// Set the deadline for each embedding call. Sub-second precision is dropped.
    pub fn embedding_timeout(mut self, timeout: Duration) -> Self {
        self.config.embedding_timeout_secs = timeout.as_secs();
        self
    }

    /// Set the largest accepted upload in bytes.
    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Replace the upload MIME allow-list.
    pub fn accepted_mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.accepted_mime_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// See [`RagConfig::validate`].
    pub fn build(self) -> Result<RagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RagConfig::default();
        assert_eq!(config.min_chunk_size, 700);
        assert_eq!(config.max_chunk_size, 900);
        assert_eq!(config.default_top_k, 3);
        assert_eq!(config.max_top_k, 10);
        assert_eq!(config.max_upload_bytes, 52_428_800);
        assert_eq!(config.embedding_timeout(), Duration::from_secs(30));
        assert!(!config.coalesce_trailing);
    }

    #[test]
    fn rejects_inverted_chunk_bounds() {
        let result = RagConfig::builder().min_chunk_size(1000).max_chunk_size(900).build();
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn rejects_default_top_k_above_max() {
        assert!(RagConfig::builder().default_top_k(11).build().is_err());
        assert!(RagConfig::builder().max_top_k(0).default_top_k(0).build().is_err());
    }

    #[test]
    fn rejects_max_top_k_above_hard_cap() {
        let result = RagConfig::builder().max_top_k(11).build();
        assert!(matches!(result, Err(RagError::ConfigError(_))));
        assert!(RagConfig::builder().max_top_k(MAX_TOP_K).build().is_ok());
    }

    #[test]
    fn deserialized_config_is_validated_on_request() {
        let config: RagConfig =
            serde_json::from_str(r#"{"max_top_k": 50, "embedding_timeout_secs": 0}"#).unwrap();
        assert!(config.validate().is_err());

        let config: RagConfig = serde_json::from_str(r#"{"default_top_k": 5}"#).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chunk_size, 900);
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = RagConfig::builder().embedding_timeout(Duration::from_millis(200)).build();
        assert!(result.is_err());
    }

    #[test]
    fn mime_matching_ignores_parameters_and_case() {
        let config = RagConfig::default();
        assert!(config.accepts_mime_type("application/pdf"));
        assert!(config.accepts_mime_type("Application/PDF; charset=binary"));
        assert!(!config.accepts_mime_type("text/plain"));
    }

    #[test]
    fn overlays_environment_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DOCRAG_MAX_CHUNK_SIZE", "1200"),
            ("DOCRAG_DEFAULT_TOP_K", " 5 "),
            ("DOCRAG_COALESCE_TRAILING", "true"),
        ]);
        let config = RagConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.max_chunk_size, 1200);
        assert_eq!(config.default_top_k, 5);
        assert!(config.coalesce_trailing);
        assert_eq!(config.min_chunk_size, 700);
    }

    #[test]
    fn reports_unparseable_environment_values() {
        let err = RagConfig::from_lookup(|k| (k == "DOCRAG_MAX_TOP_K").then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("DOCRAG_MAX_TOP_K"));
    }
}
