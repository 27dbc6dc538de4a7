//! askrag server
//!
//! Answers questions about a local text document over HTTP using
//! retrieval-augmented generation.

mod routes;
mod state;

use anyhow::Context;
use askrag_core::{config::AppConfig, logging};
use clap::Parser;
use state::AppContext;
use std::path::PathBuf;

/// askrag - question answering over a local knowledge base
#[derive(Parser, Debug)]
#[command(name = "askrag")]
#[command(about = "Question answering over a local knowledge base", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on (default: 127.0.0.1:8000)
    #[arg(short, long)]
    bind: Option<String>,

    /// Knowledge base document (created if missing)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chat provider (openai, ollama)
    #[arg(short, long)]
    provider: Option<String>,

    /// Chat model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --config takes the place of ASKRAG_CONFIG
    let config_flag = cli.config.clone();
    let config = AppConfig::load_with(|key| match (key, &config_flag) {
        ("ASKRAG_CONFIG", Some(path)) => Some(path.to_string_lossy().into_owned()),
        _ => std::env::var(key).ok(),
    })?;

    let config = config.with_overrides(
        cli.bind,
        cli.document,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("askrag starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Document: {:?}", config.document_path);
    tracing::debug!("Provider: {} ({})", config.provider, config.model);
    tracing::debug!(
        "Embeddings: {} ({})",
        config.embedding_provider,
        config.embedding_model
    );

    if !config.has_api_key() {
        tracing::warn!(
            "{} is not set; providers that need it will fail to initialize",
            config.api_key_env
        );
    }

    let context = AppContext::start(&config).await?;
    if let AppContext::Unavailable { reason } = &context {
        tracing::warn!("Serving without a RAG pipeline: {}", reason);
    }

    serve(&config.bind, context).await
}

async fn serve(bind: &str, context: AppContext) -> anyhow::Result<()> {
    let app = routes::router(context);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
