//! doc-rag - retrieval-augmented question answering over web documentation
//!
//! Loads a documentation page and a sitemap, splits the text into
//! overlapping chunks, embeds them into an in-memory vector index and asks a
//! chat model to answer a question from the closest chunks.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Adapters** (`adapters`): web/sitemap loaders, OpenAI embeddings and chat
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP client, vector index
//! - **Service Layer** (`services`): indexing, retrieval and the QA chain
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use doc_rag::{ConfigLoader, RagPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let pipeline = RagPipeline::from_config(&config)?;
//!     let (result, _) = pipeline.run(&config.question).await?;
//!     println!("{}", result.answer);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Chunk, ChunkingConfig, Config, Document, DocumentMetadata, SearchResult, SitemapSourceConfig,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{IndexSummary, QaResult, RagPipeline, RetrievalQa};
