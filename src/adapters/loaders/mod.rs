//! Document loader adapters.

pub mod sitemap;
pub mod web;

pub use sitemap::{parse_sitemap, SitemapEntries, SitemapLoader};
pub use web::{parse_html, PageFetcher, WebPageLoader};
