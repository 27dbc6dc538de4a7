//! Question answering pipeline: retrieve, then generate.

use crate::rag::generator::AnswerGenerator;
use crate::retriever::Retriever;
use askrag_core::AppResult;

/// Immutable pipeline shared by all requests.
#[derive(Clone)]
pub struct RagPipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl RagPipeline {
    pub fn new(retriever: Retriever, generator: AnswerGenerator) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    /// Answer a question: one retrieval followed by one completion.
    pub async fn ask(&self, question: &str) -> AppResult<String> {
        tracing::debug!("Answering question ({} chars)", question.chars().count());

        let segments = self.retriever.retrieve(question).await?;

        tracing::info!(
            "Retrieved {} segments (top score: {:.3})",
            segments.len(),
            segments.first().map(|s| s.score).unwrap_or(0.0)
        );

        self.generator.generate_answer(question, &segments).await
    }
}
