//! Infrastructure: configuration, logging, the OpenAI HTTP client and the
//! in-memory vector index.

pub mod config;
pub mod logging;
pub mod openai;
pub mod vector;
