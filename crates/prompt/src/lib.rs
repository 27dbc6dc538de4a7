//! Prompt templates for askrag.
//!
//! This crate provides:
//! - The built-in RAG prompt (system instruction + user question)
//! - YAML-based template overrides
//! - Handlebars rendering

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_rag_prompt;
pub use loader::load_template;
pub use types::{BuiltPrompt, PromptTemplate};
