//! OpenAI HTTP plumbing shared by the embedding and chat adapters.

pub mod client;
pub mod error;

pub use client::{resolve_api_key, OpenAiHttpClient, API_KEY_ENV};
pub use error::OpenAiApiError;
