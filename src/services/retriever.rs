//! Retriever over a vector store.

use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RetrievalConfig, SearchResult, SearchType};
use crate::domain::ports::VectorStore;

/// Returns the chunks most relevant to a query
pub struct VectorStoreRetriever {
    store: Arc<dyn VectorStore>,
    config: RetrievalConfig,
}

impl VectorStoreRetriever {
    pub fn new(store: Arc<dyn VectorStore>, config: RetrievalConfig) -> DomainResult<Self> {
        if config.k == 0 {
            return Err(DomainError::ValidationFailed(
                "retriever k must be at least 1".to_string(),
            ));
        }
        if config.search_type == SearchType::SimilarityScoreThreshold
            && config.score_threshold.is_none()
        {
            return Err(DomainError::ValidationFailed(
                "similarity_score_threshold search requires score_threshold".to_string(),
            ));
        }

        Ok(Self { store, config })
    }

    /// Number of chunks requested from the store
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Retrieve up to `k` chunks for `query`, closest first
    pub async fn retrieve(&self, query: &str) -> DomainResult<Vec<SearchResult>> {
        let results = self.store.similarity_search(query, self.config.k).await?;

        let results = match (self.config.search_type, self.config.score_threshold) {
            (SearchType::SimilarityScoreThreshold, Some(threshold)) => {
                let before = results.len();
                let kept: Vec<SearchResult> = results
                    .into_iter()
                    .filter(|r| r.relevance_score() >= threshold)
                    .collect();
                debug!(before, after = kept.len(), threshold, "applied score threshold");
                kept
            }
            _ => results,
        };

        debug!(query_len = query.len(), found = results.len(), "retrieved context");
        Ok(results)
    }
}
