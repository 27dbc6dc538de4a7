//! Vector index abstraction for segments.

use crate::types::ScoredSegment;
use askrag_core::AppResult;

/// Trait for vector index backends.
///
/// Indexes are built once and then only read, so every method takes `&self`.
pub trait VectorIndex: Send + Sync {
    /// Search for the `top_k` segments most similar to the query embedding.
    ///
    /// Returns segments ordered by descending similarity score.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredSegment>>;

    /// Number of indexed segments.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension every stored and query vector must have.
    fn dimensions(&self) -> usize;
}
