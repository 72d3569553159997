//! Indexing service
//!
//! Loads documents from every configured loader, splits them into chunks and
//! embeds the chunks into an in-memory vector store.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Chunk, Document};
use crate::domain::ports::{DocumentLoader, EmbeddingProvider};
use crate::infrastructure::vector::{CharacterTextSplitter, InMemoryVectorStore};

/// Counts reported after indexing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub documents: usize,
    pub chunks: usize,
}

/// Builds the searchable index for one run
pub struct IndexingService {
    loaders: Vec<Box<dyn DocumentLoader>>,
    splitter: CharacterTextSplitter,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IndexingService {
    pub fn new(
        loaders: Vec<Box<dyn DocumentLoader>>,
        splitter: CharacterTextSplitter,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            loaders,
            splitter,
            embedder,
        }
    }

    /// Run every loader in order and concatenate their documents
    #[instrument(skip(self), fields(loaders = self.loaders.len()))]
    pub async fn load_documents(&self) -> DomainResult<Vec<Document>> {
        let mut documents = Vec::new();
        for loader in &self.loaders {
            let loaded = loader.load().await?;
            info!(loader = loader.name(), documents = loaded.len(), "loader finished");
            documents.extend(loaded);
        }
        Ok(documents)
    }

    /// Split documents into chunks
    pub fn split(&self, documents: &[Document]) -> Vec<Chunk> {
        let chunks = self.splitter.split_documents(documents);
        info!(documents = documents.len(), chunks = chunks.len(), "split documents");
        chunks
    }

    /// Embed `chunks` into a new store, one provider batch at a time
    ///
    /// `on_batch` receives the number of chunks embedded so far and the total.
    pub async fn build_store<F>(&self, chunks: Vec<Chunk>, on_batch: F) -> DomainResult<InMemoryVectorStore>
    where
        F: FnMut(usize, usize) + Send,
    {
        if chunks.is_empty() {
            return Err(DomainError::ValidationFailed(
                "no text chunks were produced from the configured sources".to_string(),
            ));
        }

        let total = chunks.len();
        let store =
            InMemoryVectorStore::from_chunks_with_progress(chunks, self.embedder.clone(), on_batch).await?;

        info!(chunks = total, provider = self.embedder.name(), "vector store built");
        Ok(store)
    }

    /// Load, split and embed in one call
    pub async fn build_index(&self) -> DomainResult<(InMemoryVectorStore, IndexSummary)> {
        let documents = self.load_documents().await?;
        let chunks = self.split(&documents);
        let summary = IndexSummary {
            documents: documents.len(),
            chunks: chunks.len(),
        };
        let store = self.build_store(chunks, |_, _| {}).await?;
        Ok((store, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChunkingConfig;
    use crate::domain::ports::{EmbeddingInput, EmbeddingOutput, VectorStore};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticLoader(&'static str, Vec<&'static str>);

    #[async_trait]
    impl DocumentLoader for StaticLoader {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn load(&self) -> DomainResult<Vec<Document>> {
            Ok(self
                .1
                .iter()
                .enumerate()
                .map(|(i, text)| Document::new(format!("https://{}.example/{i}", self.0), *text))
                .collect())
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl DocumentLoader for FailingLoader {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn load(&self) -> DomainResult<Vec<Document>> {
            Err(DomainError::LoadFailed {
                url: "https://down.example".to_string(),
                reason: "HTTP 503".to_string(),
            })
        }
    }

    /// Embeds text as its length; records batch sizes
    #[derive(Default)]
    struct LengthEmbedder {
        batches: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl EmbeddingProvider for LengthEmbedder {
        fn name(&self) -> &'static str {
            "length"
        }

        fn dimension(&self) -> usize {
            1
        }

        async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
            Ok(vec![text.len() as f32])
        }

        async fn embed_batch(&self, inputs: &[EmbeddingInput]) -> DomainResult<Vec<EmbeddingOutput>> {
            self.batches.lock().unwrap().push(inputs.len());
            Ok(inputs
                .iter()
                .map(|i| EmbeddingOutput {
                    id: i.id.clone(),
                    vector: vec![i.text.len() as f32],
                })
                .collect())
        }

        fn max_batch_size(&self) -> usize {
            2
        }
    }

    fn boxed<L: DocumentLoader + 'static>(loader: L) -> Box<dyn DocumentLoader> {
        Box::new(loader)
    }

    fn service(loaders: Vec<Box<dyn DocumentLoader>>, embedder: Arc<LengthEmbedder>) -> IndexingService {
        let splitter = CharacterTextSplitter::with_config(ChunkingConfig {
            chunk_size: 7,
            chunk_overlap: 3,
            separator: " ".to_string(),
        })
        .unwrap();
        IndexingService::new(loaders, splitter, embedder)
    }

    #[tokio::test]
    async fn test_loaders_run_in_order() {
        let svc = service(
            vec![
                boxed(StaticLoader("web", vec!["one"])),
                boxed(StaticLoader("sitemap", vec!["two", "three"])),
            ],
            Arc::new(LengthEmbedder::default()),
        );

        let documents = svc.load_documents().await.unwrap();
        let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_loader_failure_aborts() {
        let svc = service(
            vec![boxed(StaticLoader("web", vec!["one"])), boxed(FailingLoader)],
            Arc::new(LengthEmbedder::default()),
        );

        let result = svc.build_index().await;
        assert!(matches!(result, Err(DomainError::LoadFailed { .. })));
    }

    #[tokio::test]
    async fn test_build_index_batches_embeddings() {
        let embedder = Arc::new(LengthEmbedder::default());
        let svc = service(
            vec![boxed(StaticLoader("web", vec!["foo bar baz 123", "solo"]))],
            embedder.clone(),
        );

        let (store, summary) = svc.build_index().await.unwrap();

        assert_eq!(summary, IndexSummary { documents: 2, chunks: 4 });
        assert_eq!(store.len().await, 4);
        assert_eq!(*embedder.batches.lock().unwrap(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_progress_callback() {
        let svc = service(vec![], Arc::new(LengthEmbedder::default()));
        let chunks = svc.split(&[Document::new("https://a.example", "foo bar baz 123")]);

        let mut seen = Vec::new();
        svc.build_store(chunks, |done, total| seen.push((done, total)))
            .await
            .unwrap();

        assert_eq!(seen, vec![(2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_no_chunks_is_error() {
        let svc = service(
            vec![boxed(StaticLoader("web", vec!["   "]))],
            Arc::new(LengthEmbedder::default()),
        );

        let result = svc.build_index().await;
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }
}
