//! Adapters for external services: document loaders, embeddings, chat models.

pub mod embeddings;
pub mod llm;
pub mod loaders;
