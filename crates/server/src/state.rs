//! Service state, decided once at startup.

use askrag_core::{AppConfig, AppResult};
use askrag_knowledge::{ensure_document, initialize, RagPipeline};

/// Whether the service can answer questions.
///
/// Never changes after [`AppContext::start`] returns. The router shares it
/// behind a single `Arc`.
pub enum AppContext {
    Ready(RagPipeline),
    Unavailable { reason: String },
}

impl AppContext {
    /// Provision the document and build the pipeline.
    ///
    /// Provisioning errors abort startup. Pipeline errors are logged and
    /// leave the service `Unavailable`.
    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        ensure_document(&config.document_path)?;
        Ok(Self::from_init(initialize(config).await))
    }

    pub fn from_init(result: AppResult<RagPipeline>) -> Self {
        match result {
            Ok(pipeline) => {
                tracing::info!("RAG system initialized");
                AppContext::Ready(pipeline)
            }
            Err(e) => {
                tracing::error!("RAG system failed to initialize: {}", e);
                AppContext::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
