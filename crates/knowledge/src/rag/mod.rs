//! Retrieval-augmented answering.
//!
//! [`RagPipeline`] ties a [`Retriever`](crate::retriever::Retriever) to an
//! [`AnswerGenerator`]; it is built once at startup and shared read-only.

pub mod generator;
pub mod pipeline;

pub use generator::{build_context, AnswerGenerator, DEFAULT_TEMPERATURE};
pub use pipeline::RagPipeline;
