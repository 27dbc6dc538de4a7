//! Embedding capability for the knowledge base.
//!
//! Provides provider-agnostic embedding generation. The same provider
//! instance must be used for indexing and for queries so that both live in
//! the same embedding space.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
