//! End-to-end question answering pipeline.

use std::sync::Arc;
use tracing::info;

use super::indexing_service::{IndexSummary, IndexingService};
use super::rag_service::{normalize_question, QaResult, RetrievalQa};
use super::retriever::VectorStoreRetriever;
use crate::adapters::embeddings::OpenAiEmbeddingProvider;
use crate::adapters::llm::OpenAiChatModel;
use crate::adapters::loaders::{SitemapLoader, WebPageLoader};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, RetrievalConfig};
use crate::domain::ports::{ChatModel, DocumentLoader, EmbeddingProvider};
use crate::infrastructure::vector::{CharacterTextSplitter, InMemoryVectorStore};

/// Build the loaders for every configured source: web pages first, then sitemaps
pub fn build_loaders(config: &Config) -> DomainResult<Vec<Box<dyn DocumentLoader>>> {
    let mut loaders: Vec<Box<dyn DocumentLoader>> = Vec::new();

    if !config.sources.web_pages.is_empty() {
        loaders.push(Box::new(WebPageLoader::new(
            config.sources.web_pages.clone(),
            &config.http,
        )?));
    }
    for sitemap in &config.sources.sitemaps {
        loaders.push(Box::new(SitemapLoader::new(sitemap.clone(), &config.http)?));
    }

    Ok(loaders)
}

/// Load, split, embed, retrieve, answer
pub struct RagPipeline {
    indexing: IndexingService,
    llm: Arc<dyn ChatModel>,
    retrieval: RetrievalConfig,
}

impl RagPipeline {
    pub fn new(indexing: IndexingService, llm: Arc<dyn ChatModel>, retrieval: RetrievalConfig) -> Self {
        Self {
            indexing,
            llm,
            retrieval,
        }
    }

    /// Wire the OpenAI-backed pipeline described by `config`
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::new(
            &config.openai,
            config.embedding.clone(),
        )?);
        let llm: Arc<dyn ChatModel> = Arc::new(OpenAiChatModel::new(&config.openai, config.llm.clone())?);
        let splitter = CharacterTextSplitter::with_config(config.chunking.clone())?;

        let indexing = IndexingService::new(build_loaders(config)?, splitter, embedder);
        Ok(Self::new(indexing, llm, config.retrieval.clone()))
    }

    pub fn indexing(&self) -> &IndexingService {
        &self.indexing
    }

    /// Build the QA chain over an already populated store
    pub fn chain(&self, store: InMemoryVectorStore) -> DomainResult<RetrievalQa> {
        let retriever = VectorStoreRetriever::new(Arc::new(store), self.retrieval.clone())?;
        Ok(RetrievalQa::new(retriever, self.llm.clone()))
    }

    /// Run every stage for a single question
    ///
    /// A blank question is rejected before any document is fetched.
    pub async fn run(&self, question: &str) -> DomainResult<(QaResult, IndexSummary)> {
        let question = normalize_question(question)?;
        let (store, summary) = self.indexing.build_index().await?;
        info!(documents = summary.documents, chunks = summary.chunks, "index ready");

        let result = self.chain(store)?.ask(question).await?;
        Ok((result, summary))
    }
}
