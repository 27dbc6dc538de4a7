//! Configuration management for askrag.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - A YAML config file (`askrag.yaml` or `ASKRAG_CONFIG`)
//! - Environment variables
//! - Command-line flags (see [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "askrag.yaml";

/// Document provisioned and indexed when none is configured.
pub const DEFAULT_DOCUMENT_PATH: &str = "knowledge_base.txt";

const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];
const KNOWN_EMBEDDING_PROVIDERS: [&str; 3] = ["openai", "ollama", "trigram"];

/// How the document is split into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Fixed-size character windows with exact overlap
    #[default]
    Window,

    /// Boundary-aware splitting (paragraphs, sentences, words)
    Semantic,
}

impl ChunkStrategy {
    /// Parse a strategy name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "window" => Some(Self::Window),
            "semantic" => Some(Self::Semantic),
            _ => None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Address the HTTP server binds to
    pub bind: String,

    /// Plain-text document backing the knowledge base
    pub document_path: PathBuf,

    /// Maximum segment length in characters
    pub chunk_size: usize,

    /// Characters shared by consecutive segments
    pub chunk_overlap: usize,

    /// Splitting strategy
    pub chunk_strategy: ChunkStrategy,

    /// Number of segments retrieved per question
    pub top_k: usize,

    /// Chat-completion provider ("openai", "ollama")
    pub provider: String,

    /// Chat model identifier
    pub model: String,

    /// Custom chat endpoint
    pub llm_endpoint: Option<String>,

    /// Completion token limit (provider default when unset)
    pub max_tokens: Option<u32>,

    /// Embedding provider ("openai", "ollama", "trigram")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Expected embedding dimensions
    pub embedding_dimensions: usize,

    /// Custom embedding endpoint
    pub embedding_endpoint: Option<String>,

    /// Maximum texts per embedding request
    pub embedding_batch_size: usize,

    /// Environment variable holding the provider API key
    pub api_key_env: String,

    /// Provider API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Optional YAML prompt template override
    pub prompt_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    knowledge: Option<KnowledgeSection>,
    llm: Option<LlmSection>,
    embeddings: Option<EmbeddingsSection>,
    prompt: Option<PromptSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnowledgeSection {
    document: Option<PathBuf>,
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
    #[serde(rename = "chunkOverlap")]
    chunk_overlap: Option<usize>,
    strategy: Option<ChunkStrategy>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingsSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
    #[serde(rename = "batchSize")]
    batch_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptSection {
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            bind: "127.0.0.1:8000".to_string(),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            chunk_size: 500,
            chunk_overlap: 50,
            chunk_strategy: ChunkStrategy::Window,
            top_k: 4,
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            llm_endpoint: None,
            max_tokens: None,
            embedding_provider: "openai".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            embedding_dimensions: 1536,
            embedding_endpoint: None,
            embedding_batch_size: 100,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            prompt_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, using `env` to look up environment variables.
    ///
    /// Environment variables:
    /// - `ASKRAG_CONFIG`: Path to config file
    /// - `ASKRAG_BIND`: Server bind address
    /// - `ASKRAG_DOCUMENT`: Knowledge base document
    /// - `ASKRAG_CHUNK_STRATEGY`: `window` or `semantic`
    /// - `ASKRAG_PROVIDER` / `ASKRAG_MODEL`: Chat provider and model
    /// - `ASKRAG_EMBEDDING_PROVIDER` / `ASKRAG_EMBEDDING_MODEL`
    /// - `OPENAI_API_KEY` (or the variable named by `llm.apiKeyEnv`)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use askrag_core::config::AppConfig;
    ///
    /// let config = AppConfig::load_with(|key| std::env::var(key).ok())
    ///     .expect("Failed to load config");
    /// println!("Document: {:?}", config.document_path);
    /// ```
    pub fn load_with<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let explicit_file = env("ASKRAG_CONFIG").map(PathBuf::from);
        let config_path = explicit_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
            config.config_file = Some(config_path);
        } else if let Some(path) = explicit_file {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                path
            )));
        }

        // Environment variables override YAML config
        if let Some(bind) = env("ASKRAG_BIND") {
            config.bind = bind;
        }

        if let Some(document) = env("ASKRAG_DOCUMENT") {
            config.document_path = PathBuf::from(document);
        }

        if let Some(strategy) = env("ASKRAG_CHUNK_STRATEGY") {
            config.chunk_strategy = ChunkStrategy::parse(&strategy).ok_or_else(|| {
                AppError::Config(format!(
                    "Unknown chunk strategy: {}. Supported: window, semantic",
                    strategy
                ))
            })?;
        }

        if let Some(provider) = env("ASKRAG_PROVIDER") {
            config.provider = provider;
        }

        if let Some(model) = env("ASKRAG_MODEL") {
            config.model = model;
        }

        if let Some(provider) = env("ASKRAG_EMBEDDING_PROVIDER") {
            config.embedding_provider = provider;
        }

        if let Some(model) = env("ASKRAG_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        config.api_key = env(&config.api_key_env).filter(|key| !key.trim().is_empty());

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.clone().merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(bind) = file.server.and_then(|s| s.bind) {
            self.bind = bind;
        }

        if let Some(knowledge) = file.knowledge {
            if let Some(document) = knowledge.document {
                self.document_path = document;
            }
            if let Some(size) = knowledge.chunk_size {
                self.chunk_size = size;
            }
            if let Some(overlap) = knowledge.chunk_overlap {
                self.chunk_overlap = overlap;
            }
            if let Some(strategy) = knowledge.strategy {
                self.chunk_strategy = strategy;
            }
            if let Some(top_k) = knowledge.top_k {
                self.top_k = top_k;
            }
        }

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if llm.endpoint.is_some() {
                self.llm_endpoint = llm.endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                self.api_key_env = api_key_env;
            }
            if llm.max_tokens.is_some() {
                self.max_tokens = llm.max_tokens;
            }
        }

        if let Some(embeddings) = file.embeddings {
            if let Some(provider) = embeddings.provider {
                self.embedding_provider = provider;
            }
            if let Some(model) = embeddings.model {
                self.embedding_model = model;
            }
            if let Some(dimensions) = embeddings.dimensions {
                self.embedding_dimensions = dimensions;
            }
            if embeddings.endpoint.is_some() {
                self.embedding_endpoint = embeddings.endpoint;
            }
            if let Some(batch_size) = embeddings.batch_size {
                self.embedding_batch_size = batch_size;
            }
        }

        if let Some(file) = file.prompt.and_then(|p| p.file) {
            self.prompt_file = Some(file);
        }

        if let Some(logging) = file.logging {
            if logging.level.is_some() {
                self.log_level = logging.level;
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        self
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        document: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }

        if let Some(document) = document {
            self.document_path = document;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Whether a provider API key was found in the environment.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding_provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding_provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.chunk_size == 0 {
            return Err(AppError::Config("chunkSize must be greater than 0".to_string()));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config("topK must be greater than 0".to_string()));
        }

        if self.embedding_dimensions == 0 || self.embedding_batch_size == 0 {
            return Err(AppError::Config(
                "embedding dimensions and batchSize must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
