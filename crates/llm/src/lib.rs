//! Chat-completion integration for askrag.
//!
//! This crate provides a provider-agnostic abstraction over chat-completion
//! models behind the [`LlmClient`] trait.
//!
//! # Providers
//! - **OpenAI**: `/v1/chat/completions` (default)
//! - **Ollama**: local runtime, `/api/chat`
//!
//! # Example
//! ```no_run
//! use askrag_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...")?;
//! let request = LlmRequest::new("Who landed on the moon?", "gpt-3.5-turbo")
//!     .with_system("Answer briefly.");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::{ChatMessage, ChatRole, ProviderType};
