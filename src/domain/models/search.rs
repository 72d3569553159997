//! Vector index records and search results.

use serde::Serialize;

use super::chunking::Chunk;

/// A chunk together with its embedding, as held by the vector index
#[derive(Debug, Clone)]
pub struct VectorRecord {
    /// Insertion position in the index
    pub position: usize,

    /// The embedded chunk
    pub chunk: Chunk,

    /// Embedding vector for `chunk.content`
    pub embedding: Vec<f32>,
}

/// A chunk returned by a similarity search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The matching chunk
    pub chunk: Chunk,

    /// Euclidean distance between the query and the chunk embedding (lower is closer)
    pub distance: f32,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(chunk: Chunk, distance: f32) -> Self {
        Self { chunk, distance }
    }

    /// Relevance in `[0, 1]` for unit-length embeddings (1 = identical)
    pub fn relevance_score(&self) -> f32 {
        1.0 - self.distance / std::f32::consts::SQRT_2
    }
}
