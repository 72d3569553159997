use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::chunking::ChunkingConfig;

/// Main configuration structure for doc-rag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Question asked when none is given on the command line
    #[serde(default = "default_question")]
    pub question: String,

    /// Documentation sources to load
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Text splitting configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Shared OpenAI API settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Chat model configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Retriever configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Page fetching configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_question() -> String {
    "Can you give me a C# unity script that uses the shape assets library to make a red arrow"
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question: default_question(),
            sources: SourcesConfig::default(),
            chunking: ChunkingConfig::default(),
            openai: OpenAiConfig::default(),
            embedding: EmbeddingConfig::default(),
            llm: LlmConfig::default(),
            retrieval: RetrievalConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Documentation sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourcesConfig {
    /// Single pages, one document each
    #[serde(default)]
    pub web_pages: Vec<String>,

    /// Sitemaps whose listed pages are all loaded
    #[serde(default)]
    pub sitemaps: Vec<SitemapSourceConfig>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            web_pages: vec!["https://acegikmo.com/shapes/docs".to_string()],
            sitemaps: vec![SitemapSourceConfig::new("https://docs.unity.com/sitemap.xml")],
        }
    }
}

impl SourcesConfig {
    /// Returns true when no source is configured
    pub fn is_empty(&self) -> bool {
        self.web_pages.is_empty() && self.sitemaps.is_empty()
    }
}

/// A single sitemap source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SitemapSourceConfig {
    /// Sitemap (or sitemap index) URL
    pub url: String,

    /// Regular expressions; when non-empty only matching page URLs are loaded
    #[serde(default)]
    pub filter_urls: Vec<String>,

    /// Upper bound on the number of pages loaded from this sitemap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,

    /// How deep nested sitemap indexes are followed
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

const fn default_max_depth() -> usize {
    3
}

impl SitemapSourceConfig {
    /// Sitemap source with no filters
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filter_urls: Vec::new(),
            max_pages: None,
            max_depth: default_max_depth(),
        }
    }
}

/// Shared OpenAI API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenAiConfig {
    /// API key. Falls back to `OPENAI_API_KEY` env var.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL for the API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
        }
    }
}

/// Embedding model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected embedding dimension
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Maximum texts per embeddings request
    #[serde(default = "default_embedding_batch_size")]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

const fn default_embedding_dimension() -> usize {
    1536
}

const fn default_embedding_batch_size() -> usize {
    1000
}

const fn default_embedding_timeout() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            batch_size: default_embedding_batch_size(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

/// Chat model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LlmConfig {
    /// Chat model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature (0.0-2.0)
    #[serde(default)]
    pub temperature: f32,

    /// Optional cap on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "gpt-4o".to_string()
}

const fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            temperature: 0.0,
            max_tokens: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// How the retriever selects chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Plain top-k nearest neighbours
    #[default]
    Similarity,
    /// Top-k, then drop results below `score_threshold`
    SimilarityScoreThreshold,
}

/// Retriever configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Number of chunks handed to the model
    #[serde(default = "default_k")]
    pub k: usize,

    /// Selection strategy
    #[serde(default)]
    pub search_type: SearchType,

    /// Minimum relevance score for `similarity_score_threshold`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
}

const fn default_k() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            search_type: SearchType::default(),
            score_threshold: None,
        }
    }
}

/// Page fetching configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// `User-Agent` header sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// Sitemap page fetches kept in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_user_agent() -> String {
    format!("doc-rag/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_http_timeout() -> u64 {
    30
}

const fn default_max_concurrency() -> usize {
    2
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_http_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
