//! CLI type definitions
//!
//! This module contains the clap structure that defines the CLI interface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doc-rag")]
#[command(
    about = "Answer a question from web documentation using retrieval-augmented generation",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Question to ask (defaults to the configured question)
    pub question: Option<String>,

    /// Path to a YAML config file (default: ./doc-rag.yaml)
    #[arg(short, long, value_name = "PATH", env = "DOC_RAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of chunks handed to the model
    #[arg(short, long, value_name = "N")]
    pub k: Option<usize>,

    /// Web page to load; repeatable, replaces configured sources
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Sitemap to load; repeatable, replaces configured sources
    #[arg(long = "sitemap", value_name = "URL")]
    pub sitemaps: Vec<String>,

    /// Print a table of the retrieved sources after the answer
    #[arg(long)]
    pub show_sources: bool,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Hide progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Whether spinners and progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Whether `--url` or `--sitemap` was given
    pub fn overrides_sources(&self) -> bool {
        !self.urls.is_empty() || !self.sitemaps.is_empty()
    }
}
