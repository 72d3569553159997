//! Character text splitter
//!
//! Splits text on a literal separator and greedily merges the pieces into
//! chunks of at most `chunk_size` characters, carrying up to `chunk_overlap`
//! characters of trailing context into the next chunk.

use std::collections::VecDeque;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Chunk, ChunkingConfig, Document};

/// Character-count based text splitter
///
/// Lengths are measured in Unicode scalar values. Pieces longer than
/// `chunk_size` are cut into fixed overlapping windows before merging, so no
/// chunk ever exceeds the configured maximum.
#[derive(Debug, Clone)]
pub struct CharacterTextSplitter {
    config: ChunkingConfig,
}

impl CharacterTextSplitter {
    /// Create a splitter with the default configuration (500 / 50, `"\n\n"`)
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }

    /// Create a splitter with custom configuration
    pub fn with_config(config: ChunkingConfig) -> DomainResult<Self> {
        config
            .validate()
            .map_err(|e| DomainError::ValidationFailed(format!("Invalid chunking config: {e}")))?;

        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split raw text into chunk strings, in text order
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces: Vec<String> = text
            .split(self.config.separator.as_str())
            .filter(|piece| !piece.is_empty())
            .flat_map(|piece| self.window(piece))
            .collect();

        self.merge_splits(&pieces)
    }

    /// Split every document, copying its metadata onto each chunk
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| {
                self.split_text(&doc.content)
                    .into_iter()
                    .enumerate()
                    .map(|(index, content)| Chunk::new(doc.id, content, index, doc.metadata.clone()))
            })
            .collect()
    }

    /// Cut a piece into fixed windows if it is longer than `chunk_size`
    fn window(&self, piece: &str) -> Vec<String> {
        let size = self.config.chunk_size;
        let chars: Vec<char> = piece.chars().collect();
        if chars.len() <= size {
            return vec![piece.to_string()];
        }

        let stride = self.config.stride();
        let mut windows = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + size).min(chars.len());
            windows.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }
        windows
    }

    /// Greedily merge pieces into chunks, keeping an overlapping tail
    fn merge_splits(&self, splits: &[String]) -> Vec<String> {
        let separator_len = self.config.separator.chars().count();
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut chunks = Vec::new();
        let mut current: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0_usize;

        for split in splits {
            let len = split.chars().count();
            let joiner = |current: &VecDeque<(&str, usize)>| if current.is_empty() { 0 } else { separator_len };

            if total + len + joiner(&current) > size && !current.is_empty() {
                if let Some(chunk) = self.join(&current) {
                    chunks.push(chunk);
                }

                // Drop from the front until the tail fits the overlap and the next piece fits the chunk
                while total > overlap || (total > 0 && total + len + joiner(&current) > size) {
                    let Some((_, first_len)) = current.pop_front() else {
                        break;
                    };
                    total -= first_len + joiner(&current);
                }
            }

            current.push_back((split.as_str(), len));
            total += len + if current.len() > 1 { separator_len } else { 0 };
        }

        if let Some(chunk) = self.join(&current) {
            chunks.push(chunk);
        }

        chunks
    }

    fn join(&self, pieces: &VecDeque<(&str, usize)>) -> Option<String> {
        let joined = pieces
            .iter()
            .map(|(piece, _)| *piece)
            .collect::<Vec<_>>()
            .join(&self.config.separator);
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl Default for CharacterTextSplitter {
    fn default() -> Self {
        Self::new()
    }
}
