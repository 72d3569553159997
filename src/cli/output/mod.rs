//! Output formatting utilities for the CLI.

pub mod progress;
pub mod table;

use serde::Serialize;

use crate::services::QaResult;
pub use table::TableFormatter;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Text written to stdout for `result`
pub fn render<T: CommandOutput>(result: &T, json_mode: bool) -> String {
    if json_mode {
        serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
    } else {
        result.to_human()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    println!("{}", render(result, json_mode));
}

/// Truncate a string to at most `max_len` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

/// One retrieved chunk as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutput {
    pub source: String,
    pub title: Option<String>,
    pub preview: String,
    pub distance: f32,
}

/// Result of the `doc-rag` command
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutput {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceOutput>,
    #[serde(skip)]
    pub show_sources: bool,
}

impl AnswerOutput {
    pub fn from_result(result: QaResult, show_sources: bool) -> Self {
        let sources = result
            .source_documents
            .iter()
            .map(|r| SourceOutput {
                source: r.chunk.metadata.source.clone(),
                title: r.chunk.metadata.title.clone(),
                preview: r.chunk.preview(),
                distance: r.distance,
            })
            .collect();

        Self {
            question: result.query,
            answer: result.answer,
            sources,
            show_sources,
        }
    }
}

impl CommandOutput for AnswerOutput {
    fn to_human(&self) -> String {
        if !self.show_sources {
            return self.answer.clone();
        }

        format!(
            "{}\n\n{}\n{}",
            self.answer,
            console::style("Sources").bold(),
            TableFormatter::new().format_sources(&self.sources)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Chunk, DocumentMetadata, SearchResult};
    use uuid::Uuid;

    fn qa_result() -> QaResult {
        let metadata = DocumentMetadata::new("https://acegikmo.com/shapes/docs").with_title("Shapes");
        let chunk = Chunk::new(Uuid::nil(), "Draw.Arrow draws an arrow".to_string(), 0, metadata);
        QaResult {
            query: "red arrow?".to_string(),
            answer: "Use Draw.Arrow".to_string(),
            source_documents: vec![SearchResult::new(chunk, 0.25)],
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_human_output_is_answer_only() {
        let output = AnswerOutput::from_result(qa_result(), false);
        assert_eq!(output.to_human(), "Use Draw.Arrow");
    }

    #[test]
    fn test_human_output_with_sources() {
        let output = AnswerOutput::from_result(qa_result(), true);
        let human = output.to_human();
        assert!(human.starts_with("Use Draw.Arrow\n\n"));
        assert!(human.contains("https://acegikmo.com/shapes/docs"));
    }

    #[test]
    fn test_json_output() {
        let output = AnswerOutput::from_result(qa_result(), false);
        let json = output.to_json();

        assert_eq!(json["question"], "red arrow?");
        assert_eq!(json["answer"], "Use Draw.Arrow");
        assert_eq!(json["sources"][0]["title"], "Shapes");
        assert_eq!(json["sources"][0]["preview"], "Draw.Arrow draws an arrow");
        assert!(json.get("show_sources").is_none());
    }
}
