use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use regex::Regex;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{Config, SearchType};

/// Project config file read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "doc-rag.yaml";

/// Prefix for environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "DOC_RAG_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No sources configured. Add at least one web page or sitemap")]
    NoSources,

    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    #[error("Invalid retrieval k: {0}. Must be at least 1")]
    InvalidK(usize),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid score_threshold: {0}. Must be between 0.0 and 1.0")]
    InvalidScoreThreshold(f32),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid embedding batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid http max_concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid filter_urls pattern '{pattern}' for sitemap {sitemap}: {reason}")]
    InvalidFilterPattern {
        sitemap: String,
        pattern: String,
        reason: String,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ./doc-rag.yaml (optional)
    /// 3. Environment variables (DOC_RAG_* prefix)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(Path::new(DEFAULT_CONFIG_FILE))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::figment(path)
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Figment stack for a given config file
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.question.trim().is_empty() {
            return Err(ConfigError::EmptyQuestion);
        }

        if config.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        for sitemap in &config.sources.sitemaps {
            if sitemap.url.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "sitemap url cannot be empty".to_string(),
                ));
            }
            for pattern in &sitemap.filter_urls {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidFilterPattern {
                    sitemap: sitemap.url.clone(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        config
            .chunking
            .validate()
            .map_err(ConfigError::InvalidChunking)?;

        // Validate retrieval config
        if config.retrieval.k == 0 {
            return Err(ConfigError::InvalidK(config.retrieval.k));
        }

        if let Some(threshold) = config.retrieval.score_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::InvalidScoreThreshold(threshold));
            }
        } else if config.retrieval.search_type == SearchType::SimilarityScoreThreshold {
            return Err(ConfigError::ValidationFailed(
                "search_type similarity_score_threshold requires score_threshold".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&config.llm.temperature) {
            return Err(ConfigError::InvalidTemperature(config.llm.temperature));
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }

        if config.embedding.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.embedding.batch_size));
        }

        if config.http.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(config.http.max_concurrency));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
