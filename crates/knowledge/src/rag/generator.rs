//! Answer generation via a chat-completion model.

use crate::types::ScoredSegment;
use askrag_core::AppResult;
use askrag_llm::{LlmClient, LlmRequest};
use askrag_prompt::{build_rag_prompt, PromptTemplate};
use std::sync::Arc;

/// Sampling temperature used for every answer.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Join segment texts with a blank line, in retrieval order.
pub fn build_context(segments: &[ScoredSegment]) -> String {
    segments
        .iter()
        .map(|s| s.segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Produces an answer from a question and its retrieved context.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    template: PromptTemplate,
    max_tokens: Option<u32>,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, template: PromptTemplate) -> Self {
        Self {
            client,
            model: model.into(),
            template,
            max_tokens: None,
        }
    }

    /// Cap the completion length; unset leaves it to the provider.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Make exactly one completion call and return its raw content.
    pub async fn generate_answer(
        &self,
        question: &str,
        segments: &[ScoredSegment],
    ) -> AppResult<String> {
        let context = build_context(segments);
        let prompt = build_rag_prompt(&self.template, question, &context)?;

        let mut request = LlmRequest::new(prompt.user, &self.model)
            .with_system(prompt.system)
            .with_temperature(DEFAULT_TEMPERATURE);
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        tracing::debug!(
            "Generating answer (provider: {}, model: {}, context_len: {})",
            self.client.provider_name(),
            self.model,
            context.len()
        );

        let response = self.client.complete(&request).await?;
        Ok(response.content)
    }
}
