//! OpenAI adapters against a mock HTTP server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{chat_completion, keyword_vector, KeywordEmbeddings};
use doc_rag::adapters::embeddings::OpenAiEmbeddingProvider;
use doc_rag::adapters::llm::OpenAiChatModel;
use doc_rag::domain::models::{EmbeddingConfig, LlmConfig, OpenAiConfig};
use doc_rag::domain::ports::{ChatMessage, ChatModel, ChatRequest, EmbeddingInput, EmbeddingProvider};
use doc_rag::DomainError;

fn openai(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig {
        api_key: Some("sk-test-key-0000".to_string()),
        base_url: format!("{}/v1", server.uri()),
    }
}

fn inputs(texts: &[&str]) -> Vec<EmbeddingInput> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| EmbeddingInput {
            id: format!("chunk-{i}"),
            text: (*text).to_string(),
        })
        .collect()
}

#[tokio::test]
async fn test_embed_batch_splits_requests_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer sk-test-key-0000"))
        .respond_with(KeywordEmbeddings)
        .expect(3)
        .mount(&server)
        .await;

    let config = EmbeddingConfig {
        dimension: 3,
        batch_size: 2,
        ..Default::default()
    };
    let provider = OpenAiEmbeddingProvider::new(&openai(&server), config).unwrap();

    let texts = ["arrow", "disc", "arrow arrow", "disc disc", "plain"];
    let outputs = provider.embed_batch(&inputs(&texts)).await.unwrap();

    assert_eq!(outputs.len(), 5);
    for (i, (output, text)) in outputs.iter().zip(texts).enumerate() {
        assert_eq!(output.id, format!("chunk-{i}"));
        assert_eq!(output.vector, keyword_vector(text));
    }
}

#[tokio::test]
async fn test_embed_sends_model_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(body_partial_json(json!({
            "model": "text-embedding-ada-002",
            "input": ["red arrow"]
        })))
        .respond_with(KeywordEmbeddings)
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiEmbeddingProvider::new(&openai(&server), EmbeddingConfig::default()).unwrap();
    let vector = provider.embed("red arrow").await.unwrap();

    assert_eq!(vector, keyword_vector("red arrow"));
}

#[tokio::test]
async fn test_embedding_count_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "index": 0, "embedding": [0.1, 0.2] }]
        })))
        .mount(&server)
        .await;

    let provider = OpenAiEmbeddingProvider::new(&openai(&server), EmbeddingConfig::default()).unwrap();
    let result = provider.embed_batch(&inputs(&["a", "b"])).await;

    assert!(matches!(result, Err(DomainError::EmbeddingFailed(_))));
}

#[tokio::test]
async fn test_embedding_rate_limit_maps_to_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = OpenAiEmbeddingProvider::new(&openai(&server), EmbeddingConfig::default()).unwrap();
    let err = provider.embed("x").await.unwrap_err();

    match err {
        DomainError::EmbeddingFailed(message) => assert!(message.to_lowercase().contains("rate limit")),
        other => panic!("Expected EmbeddingFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key-0000"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "temperature": 0.0,
            "max_tokens": 256,
            "messages": [
                { "role": "system", "content": "context" },
                { "role": "user", "content": "question" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("answer")))
        .expect(1)
        .mount(&server)
        .await;

    let config = LlmConfig {
        max_tokens: Some(256),
        ..Default::default()
    };
    let model = OpenAiChatModel::new(&openai(&server), config).unwrap();
    let response = model
        .complete(ChatRequest::new(vec![
            ChatMessage::system("context"),
            ChatMessage::user("question"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.content, "answer");
    assert_eq!(response.model, "gpt-4o-2024-08-06");
}

#[tokio::test]
async fn test_chat_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let model = OpenAiChatModel::new(&openai(&server), LlmConfig::default()).unwrap();
    let result = model.complete(ChatRequest::new(vec![ChatMessage::user("hi")])).await;

    assert!(matches!(result, Err(DomainError::CompletionFailed(_))));
}

#[test]
fn test_missing_api_key() {
    let config = OpenAiConfig {
        api_key: None,
        ..Default::default()
    };

    let result = temp_env::with_var_unset("OPENAI_API_KEY", || {
        OpenAiChatModel::new(&config, LlmConfig::default())
    });

    assert!(matches!(result, Err(DomainError::CompletionFailed(_))));
}

#[test]
fn test_api_key_from_environment() {
    let config = OpenAiConfig {
        api_key: None,
        ..Default::default()
    };

    let result = temp_env::with_var("OPENAI_API_KEY", Some("sk-from-env-1234"), || {
        OpenAiEmbeddingProvider::new(&config, EmbeddingConfig::default())
    });

    assert!(result.is_ok());
}
