//! Text chunking domain models
//!
//! Models for splitting documents into character-bounded chunks for embedding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::DocumentMetadata;

/// Configuration for document chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum size of each chunk in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Literal separator the text is split on before merging
    #[serde(default = "default_separator")]
    pub separator: String,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    50
}

fn default_separator() -> String {
    "\n\n".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separator: default_separator(),
        }
    }
}

impl ChunkingConfig {
    /// Create a configuration with the given window and the default separator
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separator: default_separator(),
        }
    }

    /// Validate the chunking configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }

        Ok(())
    }

    /// Distance between the starts of two consecutive fixed windows
    pub fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

/// A chunk of text cut from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier for this chunk
    pub id: String,

    /// ID of the parent document
    pub document_id: Uuid,

    /// The text content of this chunk
    pub content: String,

    /// Index of this chunk within the parent document (0-based)
    pub chunk_index: usize,

    /// Copy of the parent document's metadata
    pub metadata: DocumentMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(
        document_id: Uuid,
        content: String,
        chunk_index: usize,
        metadata: DocumentMetadata,
    ) -> Self {
        let id = format!("{document_id}:chunk:{chunk_index}");

        Self {
            id,
            document_id,
            content,
            chunk_index,
            metadata,
        }
    }

    /// Returns true if this is the first chunk
    pub fn is_first(&self) -> bool {
        self.chunk_index == 0
    }

    /// Number of characters in this chunk
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Get a preview of the content (first 100 chars)
    pub fn preview(&self) -> String {
        if self.char_count() <= 100 {
            self.content.clone()
        } else {
            let head: String = self.content.chars().take(100).collect();
            format!("{head}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.separator, "\n\n");
        assert!(config.validate().is_ok());
        assert_eq!(config.stride(), 450);
    }

    #[test]
    fn test_validate_zero_size() {
        let config = ChunkingConfig::new(0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_overlap_too_large() {
        let config = ChunkingConfig::new(100, 100);
        let err = config.validate().unwrap_err();
        assert!(err.contains("chunk_overlap"));
    }

    #[test]
    fn test_chunk_id_and_preview() {
        let doc_id = Uuid::new_v4();
        let chunk = Chunk::new(
            doc_id,
            "é".repeat(150),
            2,
            DocumentMetadata::new("https://example.com"),
        );

        assert_eq!(chunk.id, format!("{doc_id}:chunk:2"));
        assert!(!chunk.is_first());
        assert_eq!(chunk.char_count(), 150);
        assert_eq!(chunk.preview().chars().count(), 103);
    }
}
