//! Document loader port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Document;

/// Produces documents from some external source
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Short loader name for logs (e.g., "web", "sitemap")
    fn name(&self) -> &'static str;

    /// Load every document this loader is configured for, in source order
    async fn load(&self) -> DomainResult<Vec<Document>>;
}
