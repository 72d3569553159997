//! Loaded source documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document fetched from a source, before chunking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for this document
    pub id: Uuid,

    /// Extracted plain text
    pub content: String,

    /// Where the text came from
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document with fresh metadata for `source`
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: DocumentMetadata::new(source),
        }
    }

    /// Replace the metadata of this document
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Number of characters in the content
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Source metadata, copied onto every chunk cut from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// URL the document was fetched from
    pub source: String,

    /// Page `<title>`, if any
    pub title: Option<String>,

    /// `<meta name="description">`, if any
    pub description: Option<String>,

    /// `<html lang>`, if any
    pub language: Option<String>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl DocumentMetadata {
    /// Metadata with only a source set
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: None,
            description: None,
            language: None,
            fetched_at: Utc::now(),
        }
    }

    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title if present, otherwise the source URL
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new("https://example.com", "héllo");
        assert_eq!(doc.metadata.source, "https://example.com");
        assert_eq!(doc.char_count(), 5);
        assert!(doc.metadata.title.is_none());
    }

    #[test]
    fn test_display_name_prefers_title() {
        let meta = DocumentMetadata::new("https://example.com");
        assert_eq!(meta.display_name(), "https://example.com");

        let meta = meta.with_title("Example");
        assert_eq!(meta.display_name(), "Example");
    }
}
