//! Domain layer for doc-rag
//!
//! Core models, errors and the ports adapters plug into.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
