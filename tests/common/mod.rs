//! Common test utilities for integration tests
//!
//! Mock OpenAI endpoints and documentation pages served by wiremock.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use doc_rag::domain::models::{Config, EmbeddingConfig, OpenAiConfig, SitemapSourceConfig};

/// Answer returned by the mocked chat endpoint
pub const ANSWER: &str = "Call Draw.Arrow with Color.red inside OnDrawGizmos.";

/// Keywords that make up the embedding axes; a constant bias axis follows
pub const KEYWORDS: [&str; 2] = ["arrow", "disc"];

/// Embed text as keyword counts so that distances are predictable
pub fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    let mut vector: Vec<f32> = KEYWORDS
        .iter()
        .map(|kw| lower.matches(kw).count() as f32)
        .collect();
    vector.push(0.1);
    vector
}

/// Answers `/embeddings` with keyword vectors, listing data in reverse order
pub struct KeywordEmbeddings;

impl Respond for KeywordEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        let inputs: Vec<String> = body["input"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let data: Vec<Value> = inputs
            .iter()
            .enumerate()
            .rev()
            .map(|(index, text)| {
                json!({ "object": "embedding", "index": index, "embedding": keyword_vector(text) })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": data,
            "model": body["model"],
            "usage": { "prompt_tokens": 1, "total_tokens": 1 }
        }))
    }
}

/// Chat completion reply carrying `content`
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132 }
    })
}

/// Minimal HTML page
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><title>{title}</title>\
         <script>var tracking = 1;</script></head>\
         <body><nav>Menu</nav><main><p>{body}</p></main></body></html>"
    )
}

/// Sitemap `<urlset>` listing `urls`
pub fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("<url><loc>{u}</loc></url>"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">{entries}</urlset>"
    )
}

/// Serve `body` at `route` with the given content type
pub async fn serve(server: &MockServer, route: &str, body: String, content_type: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

/// Config pointing every source and API at `server`
pub fn config_for(server: &MockServer) -> Config {
    let uri = server.uri();
    let mut sitemap = SitemapSourceConfig::new(format!("{uri}/sitemap.xml"));
    sitemap.filter_urls = vec![format!("{uri}/manual/")];

    let mut config = Config::default();
    config.sources.web_pages = vec![format!("{uri}/docs")];
    config.sources.sitemaps = vec![sitemap];
    config.openai = OpenAiConfig {
        api_key: Some("sk-test-key-0000".to_string()),
        base_url: format!("{uri}/v1"),
    };
    config.embedding = EmbeddingConfig {
        dimension: 3,
        ..Default::default()
    };
    config
}

/// Serve a docs page and a sitemap with two `/manual/` pages and one `/blog/` page
pub async fn mount_docs(server: &MockServer) {
    let uri = server.uri();
    serve(
        server,
        "/docs",
        html_page("Shapes Docs", "Shapes draws arrows with Draw.Arrow."),
        "text/html",
    )
    .await;
    serve(
        server,
        "/sitemap.xml",
        urlset(&[
            format!("{uri}/manual/a"),
            format!("{uri}/blog/c"),
            format!("{uri}/manual/b"),
        ]),
        "application/xml",
    )
    .await;
    serve(server, "/manual/a", html_page("Lines", "Line and arrow helpers."), "text/html").await;
    serve(server, "/manual/b", html_page("Discs", "Disc rendering."), "text/html").await;
}

/// Mock the embeddings and chat endpoints, expecting `embedding_calls` embedding requests and one chat request
pub async fn mount_openai(server: &MockServer, embedding_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer sk-test-key-0000"))
        .and(body_partial_json(json!({ "model": "text-embedding-ada-002" })))
        .respond_with(KeywordEmbeddings)
        .expect(embedding_calls)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o", "temperature": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(ANSWER)))
        .expect(1)
        .mount(server)
        .await;
}
