//! Query-time retrieval over a built index.

use crate::embeddings::EmbeddingProvider;
use crate::types::ScoredSegment;
use crate::vector_index::VectorIndex;
use askrag_core::AppResult;
use std::sync::Arc;

/// Embeds queries and looks up their nearest segments.
///
/// `embedder` must be the provider the index was built with.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    /// Return up to `top_k` segments nearest to `query`, nearest first.
    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<ScoredSegment>> {
        let query_embedding = self.embedder.embed(query).await?;
        self.index.search(&query_embedding, self.top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::chunk_document;
    use crate::embeddings::providers::TrigramProvider;
    use crate::index::build_index;
    use crate::types::Document;
    use askrag_core::ChunkStrategy;
    use std::path::PathBuf;

    const FACTS: &str = "Apollo 11 launched from Kennedy Space Center on July 16, 1969. \
        The lunar module Eagle landed in the Sea of Tranquility. \
        Michael Collins remained in lunar orbit aboard the command module Columbia. \
        Armstrong described his first step as one small step for man. \
        The crew splashed down in the Pacific Ocean on July 24.";

    async fn retriever(top_k: usize) -> (Retriever, Vec<String>) {
        let document = Document {
            source: PathBuf::from("facts.txt"),
            content: FACTS.to_string(),
        };
        let segments = chunk_document(&document, 80, 10, ChunkStrategy::Window).unwrap();
        let texts = segments.iter().map(|s| s.text.clone()).collect();

        let embedder = Arc::new(TrigramProvider::new(384));
        let index = build_index(segments, embedder.as_ref()).await.unwrap();

        (Retriever::new(Arc::new(index), embedder, top_k), texts)
    }

    #[tokio::test]
    async fn test_self_retrieval() {
        let (retriever, texts) = retriever(4).await;

        for text in &texts {
            let results = retriever.retrieve(text).await.unwrap();
            assert!(
                results.iter().any(|r| &r.segment.text == text),
                "segment {:?} not retrieved by its own text",
                text
            );
        }
    }

    #[tokio::test]
    async fn test_results_bounded_and_ordered() {
        let (retriever, texts) = retriever(2).await;
        assert!(texts.len() > 2);

        let results = retriever.retrieve("lunar module Eagle").await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_empty_query_is_accepted() {
        let (retriever, _) = retriever(4).await;
        let results = retriever.retrieve("").await.unwrap();
        assert_eq!(results.len(), 4);
    }
}
