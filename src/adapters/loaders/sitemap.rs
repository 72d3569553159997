//! Sitemap loader.
//!
//! Reads a sitemap (or sitemap index), then loads every listed page through
//! the web page fetcher.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashSet;
use tracing::{info, warn};

use super::web::PageFetcher;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, HttpConfig, SitemapSourceConfig};
use crate::domain::ports::DocumentLoader;

/// Locations listed by one sitemap file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapEntries {
    /// Page URLs from `<urlset>`
    pub pages: Vec<String>,
    /// Nested sitemap URLs from `<sitemapindex>`
    pub sitemaps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocKind {
    Page,
    Sitemap,
}

/// Which list the `<loc>` at the end of `path` belongs to, if any
fn loc_kind(path: &[Vec<u8>]) -> Option<LocKind> {
    match path {
        [root, parent, loc] if loc.as_slice() == b"loc" => {
            match (root.as_slice(), parent.as_slice()) {
                (b"urlset", b"url") => Some(LocKind::Page),
                (b"sitemapindex", b"sitemap") => Some(LocKind::Sitemap),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_sitemap_root(name: &[u8]) -> bool {
    name == b"urlset" || name == b"sitemapindex"
}

/// Parse a sitemap or sitemap index
///
/// Element names are matched on their local part, so namespace-prefixed
/// documents (`<sm:urlset>`) parse the same as unprefixed ones. `<loc>` text
/// may be escaped or wrapped in CDATA.
pub fn parse_sitemap(url: &str, xml: &str) -> DomainResult<SitemapEntries> {
    let parse_error = |reason: String| DomainError::SitemapParse {
        url: url.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut found_root = false;
    let mut loc = String::new();
    let mut entries = SitemapEntries::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if !found_root {
                    if !is_sitemap_root(&name) {
                        break;
                    }
                    found_root = true;
                }
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                if !found_root {
                    if !is_sitemap_root(e.local_name().as_ref()) {
                        break;
                    }
                    found_root = true;
                }
            }
            Ok(Event::Text(t)) if loc_kind(&path).is_some() => {
                let text = t.unescape().map_err(|e| parse_error(e.to_string()))?;
                loc.push_str(&text);
            }
            Ok(Event::CData(c)) if loc_kind(&path).is_some() => {
                loc.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::End(_)) => {
                if let Some(kind) = loc_kind(&path) {
                    let value = std::mem::take(&mut loc);
                    let value = value.trim();
                    if !value.is_empty() {
                        match kind {
                            LocKind::Page => entries.pages.push(value.to_string()),
                            LocKind::Sitemap => entries.sitemaps.push(value.to_string()),
                        }
                    }
                }
                path.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(parse_error(e.to_string())),
        }
    }

    if !found_root {
        return Err(parse_error("neither <urlset> nor <sitemapindex> found".to_string()));
    }
    Ok(entries)
}

/// Loads every page listed in a sitemap
pub struct SitemapLoader {
    source: SitemapSourceConfig,
    filters: Vec<Regex>,
    fetcher: PageFetcher,
    max_concurrency: usize,
}

impl SitemapLoader {
    pub fn new(source: SitemapSourceConfig, http: &HttpConfig) -> DomainResult<Self> {
        let filters = source
            .filter_urls
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    DomainError::Configuration(format!("Invalid filter_urls pattern '{pattern}': {e}"))
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self {
            source,
            filters,
            fetcher: PageFetcher::new(http)?,
            max_concurrency: http.max_concurrency.max(1),
        })
    }

    /// Sitemap URL this loader starts from
    pub fn url(&self) -> &str {
        &self.source.url
    }

    /// Whether `url` passes `filter_urls`; patterns must match from the start of the URL
    pub fn matches_filters(&self, url: &str) -> bool {
        self.filters.is_empty()
            || self
                .filters
                .iter()
                .any(|re| re.find(url).is_some_and(|m| m.start() == 0))
    }

    /// Walk the sitemap (and nested indexes up to `max_depth`) and return the
    /// page URLs to load, in sitemap order, filtered, deduplicated and capped
    pub async fn page_urls(&self) -> DomainResult<Vec<String>> {
        let mut pending = vec![(self.source.url.clone(), 0_usize)];
        let mut visited = HashSet::new();
        let mut seen_pages = HashSet::new();
        let mut pages = Vec::new();
        let limit = self.source.max_pages.unwrap_or(usize::MAX);

        while let Some((url, depth)) = pending.pop() {
            if !visited.insert(url.clone()) {
                continue;
            }

            let xml = self.fetcher.fetch_text(&url).await?;
            let entries = parse_sitemap(&url, &xml)?;

            for page in entries.pages {
                if pages.len() >= limit {
                    break;
                }
                if self.matches_filters(&page) && seen_pages.insert(page.clone()) {
                    pages.push(page);
                }
            }
            if pages.len() >= limit {
                break;
            }

            if depth < self.source.max_depth {
                // Reversed so the stack pops nested sitemaps in listed order
                pending.extend(entries.sitemaps.into_iter().rev().map(|s| (s, depth + 1)));
            } else if !entries.sitemaps.is_empty() {
                warn!(
                    sitemap = %url,
                    skipped = entries.sitemaps.len(),
                    max_depth = self.source.max_depth,
                    "nested sitemaps beyond max_depth ignored"
                );
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentLoader for SitemapLoader {
    fn name(&self) -> &'static str {
        "sitemap"
    }

    async fn load(&self) -> DomainResult<Vec<Document>> {
        let urls = self.page_urls().await?;
        info!(
            sitemap = %self.source.url,
            pages = urls.len(),
            concurrency = self.max_concurrency,
            "loading sitemap pages"
        );

        // `buffered` keeps results in sitemap order
        let fetcher = &self.fetcher;
        let documents: Vec<Document> = stream::iter(urls)
            .map(move |url| async move { fetcher.fetch_document(&url).await })
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        info!(sitemap = %self.source.url, documents = documents.len(), "loaded sitemap");
        Ok(documents)
    }
}
