//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that adapters and infrastructure implement:
//! - DocumentLoader: fetching source documents
//! - EmbeddingProvider: turning text into vectors
//! - VectorStore: nearest-neighbour search over embedded chunks
//! - ChatModel: hosted chat completion

pub mod chat_model;
pub mod document_loader;
pub mod embedding;
pub mod vector_store;

pub use chat_model::{ChatMessage, ChatModel, ChatRequest, ChatResponse, ChatRole};
pub use document_loader::DocumentLoader;
pub use embedding::{EmbeddingInput, EmbeddingOutput, EmbeddingProvider};
pub use vector_store::VectorStore;
