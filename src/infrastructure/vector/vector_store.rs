//! In-memory vector store
//!
//! Exhaustive (flat) nearest-neighbour index over chunk embeddings, using
//! Euclidean distance. Lives for one run; nothing is persisted.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Chunk, SearchResult, VectorRecord};
use crate::domain::ports::{EmbeddingInput, EmbeddingProvider, VectorStore};

/// Flat in-memory vector index
pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    records: RwLock<Vec<VectorRecord>>,
}

impl InMemoryVectorStore {
    /// Create an empty store that embeds through `embedder`
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Embed `chunks` in batches of the provider's `max_batch_size` and build a store holding them
    pub async fn from_chunks(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> DomainResult<Self> {
        Self::from_chunks_with_progress(chunks, embedder, |_, _| {}).await
    }

    /// Like [`Self::from_chunks`], calling `on_batch(done, total)` after each batch
    pub async fn from_chunks_with_progress<F>(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
        mut on_batch: F,
    ) -> DomainResult<Self>
    where
        F: FnMut(usize, usize) + Send,
    {
        let batch_size = embedder.max_batch_size().max(1);
        let store = Self::new(embedder);
        let total = chunks.len();

        let mut done = 0;
        let mut remaining = chunks;
        while !remaining.is_empty() {
            let rest = remaining.split_off(batch_size.min(remaining.len()));
            done += remaining.len();
            store.add_chunks(remaining).await?;
            on_batch(done, total);
            remaining = rest;
        }

        Ok(store)
    }

    /// Dimension every stored vector must have
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    /// Euclidean distance between two vectors
    pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }

    fn check_dimension(&self, vector: &[f32]) -> DomainResult<()> {
        let expected = self.dimension();
        if vector.len() == expected {
            Ok(())
        } else {
            Err(DomainError::DimensionMismatch {
                expected,
                actual: vector.len(),
            })
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    #[instrument(skip(self, chunks), fields(chunks = chunks.len()))]
    async fn add_chunks(&self, chunks: Vec<Chunk>) -> DomainResult<Vec<String>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<EmbeddingInput> = chunks
            .iter()
            .map(|chunk| EmbeddingInput {
                id: chunk.id.clone(),
                text: chunk.content.clone(),
            })
            .collect();

        let outputs = self.embedder.embed_batch(&inputs).await?;
        if outputs.len() != chunks.len() {
            return Err(DomainError::EmbeddingFailed(format!(
                "{} returned {} embeddings for {} chunks",
                self.embedder.name(),
                outputs.len(),
                chunks.len()
            )));
        }
        for output in &outputs {
            self.check_dimension(&output.vector)?;
        }

        let mut records = self.records.write().await;
        let mut ids = Vec::with_capacity(chunks.len());
        for (chunk, output) in chunks.into_iter().zip(outputs) {
            ids.push(chunk.id.clone());
            let position = records.len();
            records.push(VectorRecord {
                position,
                chunk,
                embedding: output.vector,
            });
        }

        debug!(total = records.len(), "chunks indexed");
        Ok(ids)
    }

    async fn similarity_search(&self, query: &str, k: usize) -> DomainResult<Vec<SearchResult>> {
        if k == 0 || self.is_empty().await {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(query).await?;
        self.similarity_search_by_vector(&embedding, k).await
    }

    async fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> DomainResult<Vec<SearchResult>> {
        self.check_dimension(embedding)?;

        let records = self.records.read().await;
        let mut scored: Vec<(f32, &VectorRecord)> = records
            .iter()
            .map(|record| (Self::l2_distance(embedding, &record.embedding), record))
            .collect();

        scored.sort_by(|(da, ra), (db, rb)| da.total_cmp(db).then(ra.position.cmp(&rb.position)));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, record)| SearchResult::new(record.chunk.clone(), distance))
            .collect())
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}
