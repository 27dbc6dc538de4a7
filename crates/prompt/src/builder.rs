//! Prompt builder for rendering templates with retrieved context.

use crate::types::{BuiltPrompt, PromptTemplate, CONTEXT_VAR, QUESTION_VAR};
use askrag_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Render the two-part RAG prompt.
///
/// The context block is injected into the system instruction and the
/// question becomes the user turn. Nothing is truncated.
///
/// # Example
/// ```
/// use askrag_prompt::{build_rag_prompt, PromptTemplate};
///
/// let built = build_rag_prompt(
///     &PromptTemplate::default(),
///     "Who landed on the moon?",
///     "Neil Armstrong and Buzz Aldrin landed the Eagle.",
/// )
/// .unwrap();
/// assert!(built.system.ends_with("landed the Eagle."));
/// assert_eq!(built.user, "Who landed on the moon?");
/// ```
pub fn build_rag_prompt(
    template: &PromptTemplate,
    question: &str,
    context: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!(
        template = %template.id,
        context_len = context.len(),
        "Building RAG prompt"
    );

    let mut variables = HashMap::new();
    variables.insert(CONTEXT_VAR, context);
    variables.insert(QUESTION_VAR, question);

    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("system", &template.system)
        .map_err(|e| AppError::Prompt(format!("Failed to register system template: {}", e)))?;
    handlebars
        .register_template_string("user", &template.user)
        .map_err(|e| AppError::Prompt(format!("Failed to register user template: {}", e)))?;

    let system = handlebars
        .render("system", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render system template: {}", e)))?;
    let user = handlebars
        .render("user", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render user template: {}", e)))?;

    Ok(BuiltPrompt { system, user })
}
