//! Vector infrastructure: text splitting and the in-memory similarity index.

pub mod chunker;
pub mod vector_store;

pub use chunker::CharacterTextSplitter;
pub use vector_store::InMemoryVectorStore;
