//! Vector store port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Chunk, SearchResult};

/// Similarity index over embedded chunks
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed and insert chunks, returning their IDs in insertion order
    async fn add_chunks(&self, chunks: Vec<Chunk>) -> DomainResult<Vec<String>>;

    /// Embed `query` and return up to `k` nearest chunks, closest first
    async fn similarity_search(&self, query: &str, k: usize) -> DomainResult<Vec<SearchResult>>;

    /// Return up to `k` chunks nearest to `embedding`, closest first
    async fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> DomainResult<Vec<SearchResult>>;

    /// Number of indexed chunks
    async fn len(&self) -> usize;

    /// Returns true when nothing is indexed
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
