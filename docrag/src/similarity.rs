//! Cosine similarity and top-K ranking over chunk embeddings.

use std::cmp::Ordering;

use crate::document::{Chunk, ScoredChunk};
use crate::error::{RagError, Result};

/// Hard upper bound on the number of chunks a single retrieval may return.
pub const MAX_TOP_K: usize = 10;

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector is empty or has zero magnitude. The result is
/// clamped into `[-1, 1]` so float rounding never escapes the valid range.
///
/// # Errors
///
/// Returns [`RagError::DimensionMismatch`] if the vectors differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Rank `chunks` by similarity to `query` and keep the best `top_k`.
///
/// Results are in descending similarity order. Chunks with equal scores keep
/// their original relative order. `top_k == 0` returns an empty `Vec`.
///
/// # Errors
///
/// Returns [`RagError::DimensionMismatch`] if any chunk embedding differs in
/// length from `query`.
pub fn find_similar_chunks(
    query: &[f32],
    chunks: &[Chunk],
    top_k: usize,
) -> Result<Vec<ScoredChunk>> {
    if top_k == 0 {
        return Ok(Vec::new());
    }

    let mut scored = chunks
        .iter()
        .map(|chunk| {
            let similarity = cosine_similarity(query, &chunk.embedding)?;
            Ok(ScoredChunk { id: chunk.id.clone(), text: chunk.text.clone(), similarity })
        })
        .collect::<Result<Vec<_>>>()?;

    // `sort_by` is stable, which keeps ties in chunk order.
    scored.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    Ok(scored)
}

/// Resolve a caller-supplied `top_k` into a usable count.
///
/// Absent values fall back to `default`, negative values become 0, and
/// anything above `max` is capped at `max`.
pub fn clamp_top_k(requested: Option<i64>, default: usize, max: usize) -> usize {
    match requested {
        None => default.min(max),
        Some(k) if k <= 0 => 0,
        Some(k) => usize::try_from(k).map_or(max, |k| k.min(max)),
    }
}
