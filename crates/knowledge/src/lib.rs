//! Knowledge base and retrieval-augmented answering.
//!
//! Startup builds everything once: the document is provisioned, loaded and
//! chunked, every segment is embedded into an in-memory index, and the
//! resulting [`RagPipeline`] is then shared read-only by all requests.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod loader;
pub mod provision;
pub mod rag;
pub mod retriever;
pub mod types;
pub mod vector_index;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::{build_index, InMemoryIndex, IndexStats};
pub use provision::{ensure_document, DEFAULT_DOCUMENT};
pub use rag::{AnswerGenerator, RagPipeline};
pub use retriever::Retriever;
pub use types::{Document, ScoredSegment, Segment};
pub use vector_index::VectorIndex;

use askrag_core::{AppConfig, AppError, AppResult};
use askrag_llm::{create_client, LlmClient};
use askrag_prompt::{load_template, PromptTemplate};
use std::sync::Arc;
use std::time::Instant;

/// Build the pipeline from configuration, creating both providers.
///
/// Every error is reported as [`AppError::Initialization`].
pub async fn initialize(config: &AppConfig) -> AppResult<RagPipeline> {
    let api_key = config.api_key.as_deref();

    let embedder = create_provider(&EmbeddingConfig::from(config), api_key)
        .map_err(AppError::into_initialization)?;
    let client = create_client(&config.provider, config.llm_endpoint.as_deref(), api_key)
        .map_err(AppError::into_initialization)?;

    initialize_with(config, embedder, client).await
}

/// Build the pipeline with the given providers.
///
/// Every error is reported as [`AppError::Initialization`].
pub async fn initialize_with(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    client: Arc<dyn LlmClient>,
) -> AppResult<RagPipeline> {
    let start = Instant::now();

    let segments = chunker::load_and_chunk(
        &config.document_path,
        config.chunk_size,
        config.chunk_overlap,
        config.chunk_strategy,
    )
    .map_err(AppError::into_initialization)?;

    let index = build_index(segments, embedder.as_ref()).await?;
    let stats = index.stats();

    let template = match &config.prompt_file {
        Some(path) => load_template(path).map_err(AppError::into_initialization)?,
        None => PromptTemplate::default(),
    };

    tracing::info!(
        "RAG pipeline ready: {} segments, {} dims (indexed at {}), template '{}', chat model '{}' via {} ({:.2}s)",
        stats.segments,
        stats.dimensions,
        stats.built_at.to_rfc3339(),
        template.id,
        config.model,
        client.provider_name(),
        start.elapsed().as_secs_f64()
    );

    let retriever = Retriever::new(Arc::new(index), embedder, config.top_k);
    let generator = AnswerGenerator::new(client, config.model.clone(), template)
        .with_max_tokens(config.max_tokens);

    Ok(RagPipeline::new(retriever, generator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;
    use askrag_llm::{LlmRequest, LlmResponse};
    use std::fs;
    use tempfile::TempDir;

    struct ContextEcho;

    #[async_trait::async_trait]
    impl LlmClient for ContextEcho {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: request.system.clone().unwrap_or_default(),
                model: request.model.clone(),
                usage: Default::default(),
            })
        }
    }

    fn config(temp: &TempDir) -> AppConfig {
        AppConfig {
            document_path: temp.path().join("knowledge_base.txt"),
            embedding_provider: "trigram".to_string(),
            embedding_dimensions: 256,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_with_default_document() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        ensure_document(&config.document_path).unwrap();

        let pipeline = initialize_with(
            &config,
            Arc::new(TrigramProvider::new(256)),
            Arc::new(ContextEcho),
        )
        .await
        .unwrap();

        let answer = pipeline.ask("Who landed on the Moon?").await.unwrap();
        assert!(answer.starts_with("Answer the question based strictly on the context below:"));
        assert!(answer.contains("Neil Armstrong"));
    }

    #[tokio::test]
    async fn test_initialize_missing_document() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);

        let err = initialize_with(
            &config,
            Arc::new(TrigramProvider::new(256)),
            Arc::new(ContextEcho),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Initialization(_)));
    }

    #[tokio::test]
    async fn test_initialize_empty_document() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        fs::write(&config.document_path, "").unwrap();

        let err = initialize_with(
            &config,
            Arc::new(TrigramProvider::new(256)),
            Arc::new(ContextEcho),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Initialization(_)));
    }

    #[tokio::test]
    async fn test_initialize_openai_without_key() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            document_path: temp.path().join("knowledge_base.txt"),
            api_key: None,
            ..Default::default()
        };
        ensure_document(&config.document_path).unwrap();

        let err = initialize(&config).await.err().unwrap();
        assert!(matches!(err, AppError::Initialization(_)));
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn test_initialize_with_custom_template() {
        let temp = TempDir::new().unwrap();
        let prompt_path = temp.path().join("prompt.yaml");
        fs::write(
            &prompt_path,
            "id: rag.terse\nsystem: \"Facts:\\n{{context}}\"\nuser: \"Q: {{question}}\"\n",
        )
        .unwrap();

        let config = AppConfig {
            prompt_file: Some(prompt_path),
            ..config(&temp)
        };
        ensure_document(&config.document_path).unwrap();

        let pipeline = initialize_with(
            &config,
            Arc::new(TrigramProvider::new(256)),
            Arc::new(ContextEcho),
        )
        .await
        .unwrap();

        let answer = pipeline.ask("Who?").await.unwrap();
        assert!(answer.starts_with("Facts:\n"));
    }
}
