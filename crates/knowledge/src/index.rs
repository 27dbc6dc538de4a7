//! In-memory embedding index built once at startup.

use crate::embeddings::EmbeddingProvider;
use crate::types::{ScoredSegment, Segment};
use crate::vector_index::VectorIndex;
use askrag_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Exact-search index over `(segment, embedding)` pairs in insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryIndex {
    entries: Vec<(Segment, Vec<f32>)>,
    dimensions: usize,
    built_at: DateTime<Utc>,
}

/// Summary of a built index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub segments: usize,
    pub dimensions: usize,
    pub built_at: DateTime<Utc>,
}

impl InMemoryIndex {
    /// Pair segments with their embeddings.
    ///
    /// Requires at least one segment, one embedding per segment and a single
    /// non-zero dimension across all embeddings.
    pub fn from_parts(segments: Vec<Segment>, embeddings: Vec<Vec<f32>>) -> AppResult<Self> {
        if segments.is_empty() {
            return Err(AppError::Knowledge(
                "Cannot build an index from zero segments".to_string(),
            ));
        }
        if segments.len() != embeddings.len() {
            return Err(AppError::Knowledge(format!(
                "Got {} embeddings for {} segments",
                embeddings.len(),
                segments.len()
            )));
        }

        let dimensions = embeddings[0].len();
        if dimensions == 0 {
            return Err(AppError::Knowledge("Embeddings are empty".to_string()));
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dimensions) {
            return Err(AppError::Knowledge(format!(
                "Inconsistent embedding dimensions: {} and {}",
                dimensions,
                bad.len()
            )));
        }

        Ok(Self {
            entries: segments.into_iter().zip(embeddings).collect(),
            dimensions,
            built_at: Utc::now(),
        })
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            segments: self.entries.len(),
            dimensions: self.dimensions,
            built_at: self.built_at,
        }
    }
}

impl VectorIndex for InMemoryIndex {
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredSegment>> {
        if query_embedding.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Query embedding has {} dimensions, index has {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut results: Vec<ScoredSegment> = self
            .entries
            .iter()
            .map(|(segment, embedding)| ScoredSegment {
                segment: segment.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        // Stable: equal scores keep insertion order
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!(
            "Retrieved {} segments (requested top-{})",
            results.len(),
            top_k
        );

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Embed every segment and build the index.
///
/// All failures are reported as [`AppError::Initialization`].
pub async fn build_index(
    segments: Vec<Segment>,
    provider: &dyn EmbeddingProvider,
) -> AppResult<InMemoryIndex> {
    let start = Instant::now();

    let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
    let embeddings = provider
        .embed_batch(&texts)
        .await
        .map_err(AppError::into_initialization)?;

    let index =
        InMemoryIndex::from_parts(segments, embeddings).map_err(AppError::into_initialization)?;

    tracing::info!(
        "Indexed {} segments ({} dims, provider: {}, model: {}) in {:.2}s",
        index.len(),
        index.dimensions(),
        provider.provider_name(),
        provider.model_name(),
        start.elapsed().as_secs_f64()
    );

    Ok(index)
}

/// Calculate cosine similarity between two vectors.
///
/// Zero vectors score 0.0 against everything.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
