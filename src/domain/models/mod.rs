//! Domain models

pub mod chunking;
pub mod config;
pub mod document;
pub mod search;

pub use chunking::{Chunk, ChunkingConfig};
pub use config::{
    Config, EmbeddingConfig, HttpConfig, LlmConfig, LoggingConfig, OpenAiConfig,
    RetrievalConfig, SearchType, SitemapSourceConfig, SourcesConfig,
};
pub use document::{Document, DocumentMetadata};
pub use search::{SearchResult, VectorRecord};
