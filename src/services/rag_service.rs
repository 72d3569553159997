//! Retrieval-augmented question answering
//!
//! "Stuff" chain: every retrieved chunk is concatenated into a single prompt
//! and sent to the chat model in one call.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::retriever::VectorStoreRetriever;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::SearchResult;
use crate::domain::ports::{ChatMessage, ChatModel, ChatRequest};

/// System prompt preamble; the retrieved context follows the rule line
pub const SYSTEM_PROMPT_PREFIX: &str = "Use the following pieces of context to answer the user's question. \nIf you don't know the answer, just say that you don't know, don't try to make up an answer.\n----------------\n";

/// Separator between stuffed context chunks
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Answer to one question together with the chunks it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct QaResult {
    pub query: String,
    pub answer: String,
    pub source_documents: Vec<SearchResult>,
}

/// Trim `question`, rejecting one that is blank
pub fn normalize_question(question: &str) -> DomainResult<&str> {
    let question = question.trim();
    if question.is_empty() {
        return Err(DomainError::ValidationFailed("question cannot be empty".to_string()));
    }
    Ok(question)
}

/// Retrieval QA chain
pub struct RetrievalQa {
    retriever: VectorStoreRetriever,
    llm: Arc<dyn ChatModel>,
}

impl RetrievalQa {
    pub fn new(retriever: VectorStoreRetriever, llm: Arc<dyn ChatModel>) -> Self {
        Self { retriever, llm }
    }

    /// Build the chat messages for `question` with `context` stuffed into the system prompt
    pub fn build_messages(question: &str, context: &[SearchResult]) -> Vec<ChatMessage> {
        let context_str = context
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        vec![
            ChatMessage::system(format!("{SYSTEM_PROMPT_PREFIX}{context_str}")),
            ChatMessage::user(question),
        ]
    }

    /// Retrieve context for `question`, ask the model, return its answer
    #[instrument(skip(self))]
    pub async fn ask(&self, question: &str) -> DomainResult<QaResult> {
        let question = normalize_question(question)?;

        let context = self.retriever.retrieve(question).await?;
        info!(contexts = context.len(), "retrieved context for question");

        let request = ChatRequest::new(Self::build_messages(question, &context));
        let response = self.llm.complete(request).await?;
        info!(model = %response.model, answer_chars = response.content.len(), "received answer");

        Ok(QaResult {
            query: question.to_string(),
            answer: response.content,
            source_documents: context,
        })
    }
}
