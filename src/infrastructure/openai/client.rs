//! Shared HTTP client for the OpenAI REST API.

use reqwest::{header, Client as ReqwestClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::OpenAiApiError;
use crate::domain::models::OpenAiConfig;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Thin JSON-over-HTTP client shared by the embeddings and chat adapters
///
/// Handles bearer authentication, the base URL and status classification.
/// No retries: a failed request fails the run.
#[derive(Debug, Clone)]
pub struct OpenAiHttpClient {
    http_client: ReqwestClient,
    api_key: String,
    base_url: String,
}

impl OpenAiHttpClient {
    /// Build a client from config, resolving the API key
    pub fn new(config: &OpenAiConfig, timeout_secs: u64) -> Result<Self, OpenAiApiError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
            .ok_or(OpenAiApiError::MissingApiKey)?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `{base_url}/{path}` and decode the JSON reply
    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    pub async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, OpenAiApiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(OpenAiApiError::from_status(status, &body));
        }

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "OpenAI response received");

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pick the configured key, falling back to the environment; blank keys count as unset
pub fn resolve_api_key(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .or_else(|| from_env.filter(|k| !k.trim().is_empty()))
}
