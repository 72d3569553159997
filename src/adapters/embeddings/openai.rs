//! OpenAI embedding provider adapter.
//!
//! Generates embeddings via the OpenAI `/v1/embeddings` endpoint. Compatible
//! with any OpenAI-compatible embedding API (e.g., Azure OpenAI, local servers).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EmbeddingConfig, OpenAiConfig};
use crate::domain::ports::embedding::{EmbeddingInput, EmbeddingOutput, EmbeddingProvider};
use crate::infrastructure::openai::{OpenAiApiError, OpenAiHttpClient};

/// OpenAI embedding provider.
pub struct OpenAiEmbeddingProvider {
    config: EmbeddingConfig,
    client: OpenAiHttpClient,
}

impl OpenAiEmbeddingProvider {
    pub fn new(openai: &OpenAiConfig, config: EmbeddingConfig) -> DomainResult<Self> {
        let client = OpenAiHttpClient::new(openai, config.timeout_secs).map_err(embedding_error)?;
        Ok(Self { config, client })
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> DomainResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let request_body = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        let result: EmbeddingsResponse = self
            .client
            .post_json("embeddings", &request_body)
            .await
            .map_err(embedding_error)?;

        if result.data.len() != expected {
            return Err(DomainError::EmbeddingFailed(format!(
                "Embedding API returned {} vectors for {} inputs",
                result.data.len(),
                expected
            )));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

fn embedding_error(err: OpenAiApiError) -> DomainError {
    DomainError::EmbeddingFailed(err.to_string())
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        let results = self.call_embeddings_api(vec![text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::EmbeddingFailed("Empty embedding response".to_string()))
    }

    async fn embed_batch(&self, inputs: &[EmbeddingInput]) -> DomainResult<Vec<EmbeddingOutput>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_outputs = Vec::with_capacity(inputs.len());

        for batch in inputs.chunks(self.max_batch_size()) {
            let texts = batch.iter().map(|i| i.text.clone()).collect();
            let vectors = self.call_embeddings_api(texts).await?;
            debug!(batch_size = batch.len(), model = %self.config.model, "embedded batch");

            for (input, vector) in batch.iter().zip(vectors) {
                all_outputs.push(EmbeddingOutput {
                    id: input.id.clone(),
                    vector,
                });
            }
        }

        Ok(all_outputs)
    }

    fn max_batch_size(&self) -> usize {
        self.config.batch_size.max(1)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
