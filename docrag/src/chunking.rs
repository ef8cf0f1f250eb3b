//! Word-bounded text chunking.
//!
//! Text is split on whitespace and words are packed greedily into chunks of at
//! most `max_size` characters. Words are never split: a single word longer than
//! `max_size` becomes its own chunk.

/// Default advisory lower bound on chunk length, in characters.
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 700;

/// Default upper bound on chunk length, in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 900;

/// A strategy for splitting extracted text into chunk texts.
///
/// Implementations return chunk texts in source order with no empty entries.
/// Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split `text` into chunks. Returns an empty `Vec` for blank input.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Split `text` into word-bounded chunks of at most `max_size` characters.
///
/// `min_size` is advisory and does not affect boundaries; see
/// [`WordChunker::with_coalesce_trailing`] for the opt-in merge of a short
/// final chunk.
///
/// # Example
///
/// ```rust
/// use docrag::chunk_text;
///
/// let chunks = chunk_text("alpha beta gamma", 1, 10);
/// assert_eq!(chunks, vec!["alpha beta", "gamma"]);
/// ```
pub fn chunk_text(text: &str, min_size: usize, max_size: usize) -> Vec<String> {
    WordChunker::new(min_size, max_size).chunk(text)
}

/// Greedy word packer bounded by `max_size` characters.
///
/// # Example
///
/// ```rust
/// use docrag::{Chunker, WordChunker};
///
/// let chunker = WordChunker::default();
/// assert!(chunker.chunk("   ").is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordChunker {
    min_size: usize,
    max_size: usize,
    coalesce_trailing: bool,
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE)
    }
}

impl WordChunker {
    /// Create a new `WordChunker`.
    ///
    /// # Arguments
    ///
    /// * `min_size` — advisory minimum chunk length in characters
    /// * `max_size` — maximum chunk length in characters
    pub fn new(min_size: usize, max_size: usize) -> Self {
        Self { min_size, max_size, coalesce_trailing: false }
    }

    /// Merge a final chunk shorter than `min_size` into the one before it.
    ///
    /// The merged chunk may exceed `max_size` by up to `min_size` characters.
    /// Off by default.
    pub fn with_coalesce_trailing(mut self, coalesce: bool) -> Self {
        self.coalesce_trailing = coalesce;
        self
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Chunker for WordChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        // Character count of `current`; `String::len` counts bytes.
        let mut current_chars = 0;

        for word in text.split_whitespace() {
            let word_chars = word.chars().count();
            let appended =
                if current.is_empty() { word_chars } else { current_chars + 1 + word_chars };

            if appended > self.max_size && !current.is_empty() {
                chunks.push(current.trim().to_string());
                current = word.to_string();
                current_chars = word_chars;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_chars = appended;
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks.retain(|c| !c.is_empty());

        if self.coalesce_trailing && chunks.len() > 1 {
            let last_short =
                chunks.last().is_some_and(|last| last.chars().count() < self.min_size);
            if last_short {
                if let Some(last) = chunks.pop() {
                    if let Some(prev) = chunks.last_mut() {
                        prev.push(' ');
                        prev.push_str(&last);
                    }
                }
            }
        }

        chunks
    }
}
