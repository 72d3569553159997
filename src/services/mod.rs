//! Application services: indexing, retrieval and question answering.

pub mod indexing_service;
pub mod pipeline;
pub mod rag_service;
pub mod retriever;

pub use indexing_service::{IndexSummary, IndexingService};
pub use pipeline::{build_loaders, RagPipeline};
pub use rag_service::{normalize_question, QaResult, RetrievalQa};
pub use retriever::VectorStoreRetriever;
