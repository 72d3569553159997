//! Web page loader.
//!
//! Fetches pages over HTTP and reduces the HTML to readable text. Block-level
//! elements become paragraphs separated by a blank line, so the character
//! splitter's default `"\n\n"` separator falls on natural boundaries.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, DocumentMetadata, HttpConfig};
use crate::domain::ports::DocumentLoader;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));
static HTML: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("html").expect("valid selector"));

/// Elements whose content is never visible text
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

/// Elements that start a new paragraph
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "td", "th",
    "tr", "ul",
];

/// Separator placed between extracted paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// HTTP GET helper shared by the web and sitemap loaders
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body; non-2xx statuses are errors
    #[instrument(skip(self))]
    pub async fn fetch_text(&self, url: &str) -> DomainResult<String> {
        let load_failed = |reason: String| DomainError::LoadFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| load_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_failed(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| load_failed(e.to_string()))?;
        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }

    /// Fetch `url` and turn its HTML into a document
    pub async fn fetch_document(&self, url: &str) -> DomainResult<Document> {
        let html = self.fetch_text(url).await?;
        Ok(parse_html(url, &html))
    }
}

/// Extract readable text and metadata from an HTML page
pub fn parse_html(source: &str, html: &str) -> Document {
    let document = Html::parse_document(html);

    let mut metadata = DocumentMetadata::new(source);
    metadata.title = document
        .select(&TITLE)
        .next()
        .map(|t| collapse_whitespace(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty());
    metadata.description = document
        .select(&DESCRIPTION)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|d| !d.is_empty());
    metadata.language = document
        .select(&HTML)
        .next()
        .and_then(|h| h.value().attr("lang"))
        .map(ToString::to_string);

    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    collect_text(root, false, &mut paragraphs, &mut current);
    flush(&mut paragraphs, &mut current);

    Document::new(source, paragraphs.join(PARAGRAPH_SEPARATOR)).with_metadata(metadata)
}

fn collect_text(element: ElementRef<'_>, preformatted: bool, out: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if preformatted {
                    current.push_str(text);
                } else {
                    push_collapsed(current, text);
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    current.push('\n');
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    flush(out, current);
                }
                collect_text(child_ref, preformatted || name == "pre", out, current);
                if block {
                    flush(out, current);
                }
            }
            _ => {}
        }
    }
}

fn needs_gap(current: &str) -> bool {
    !current.is_empty() && !current.ends_with([' ', '\n'])
}

/// Append text with runs of whitespace collapsed to single spaces
fn push_collapsed(current: &mut String, text: &str) {
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        if !text.is_empty() && needs_gap(current) {
            current.push(' ');
        }
        return;
    }

    if text.starts_with(char::is_whitespace) && needs_gap(current) {
        current.push(' ');
    }
    for (i, word) in words.enumerate() {
        if i > 0 {
            current.push(' ');
        }
        current.push_str(word);
    }
    if text.ends_with(char::is_whitespace) {
        current.push(' ');
    }
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    let paragraph = current.trim();
    if !paragraph.is_empty() {
        out.push(paragraph.to_string());
    }
    current.clear();
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Loads a fixed list of pages, one document per URL
pub struct WebPageLoader {
    urls: Vec<String>,
    fetcher: PageFetcher,
}

impl WebPageLoader {
    pub fn new(urls: Vec<String>, config: &HttpConfig) -> DomainResult<Self> {
        Ok(Self {
            urls,
            fetcher: PageFetcher::new(config)?,
        })
    }

    /// Configured page URLs
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

#[async_trait]
impl DocumentLoader for WebPageLoader {
    fn name(&self) -> &'static str {
        "web"
    }

    async fn load(&self) -> DomainResult<Vec<Document>> {
        let mut documents = Vec::with_capacity(self.urls.len());
        for url in &self.urls {
            let document = self.fetcher.fetch_document(url).await?;
            info!(url = %url, chars = document.char_count(), "loaded web page");
            documents.push(document);
        }
        Ok(documents)
    }
}
