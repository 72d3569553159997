//! The `doc-rag` command: index the configured sources and answer one question.

use anyhow::{Context, Result};
use std::future::Future;

use crate::cli::output::progress::{create_progress_bar, create_spinner, ProgressBarExt};
use crate::cli::output::{output, AnswerOutput};
use crate::cli::types::Cli;
use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, SitemapSourceConfig};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::{normalize_question, RagPipeline};

pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    apply_overrides(&mut config, &cli);
    ConfigLoader::validate(&config).context("Invalid command-line overrides")?;

    let _logger = LoggerImpl::init(&config.logging)?;

    let result = answer(&config, &cli).await?;
    output(&result, cli.json);
    Ok(())
}

/// Run every pipeline stage for `config.question`, drawing progress unless quiet
pub async fn answer(config: &Config, cli: &Cli) -> Result<AnswerOutput> {
    let question = normalize_question(&config.question)?;
    let visible = cli.show_progress();

    let pipeline = RagPipeline::from_config(config).context("Failed to set up pipeline")?;
    let indexing = pipeline.indexing();

    let spinner = create_spinner("Loading documents", visible);
    let documents = stage(&spinner, indexing.load_documents()).await?;
    spinner.finish_success(format!("Loaded {} documents", documents.len()));

    let chunks = indexing.split(&documents);
    let total = chunks.len();

    let bar = create_progress_bar(total as u64, visible);
    bar.set_message("Embedding chunks");
    let store = stage(
        &bar,
        indexing.build_store(chunks, |done, _| bar.set_position(done as u64)),
    )
    .await?;
    bar.finish_success(format!("Embedded {total} chunks"));

    let chain = pipeline.chain(store)?;
    let spinner = create_spinner(format!("Asking {}", config.llm.model), visible);
    let result = stage(&spinner, chain.ask(question)).await?;
    spinner.finish_success("Answer received");

    Ok(AnswerOutput::from_result(result, cli.show_sources))
}

/// Await one pipeline stage, marking its indicator failed on error
async fn stage<T>(
    indicator: &indicatif::ProgressBar,
    fut: impl Future<Output = DomainResult<T>>,
) -> Result<T> {
    match fut.await {
        Ok(value) => Ok(value),
        Err(err) => {
            indicator.finish_error("failed");
            Err(err.into())
        }
    }
}

/// Apply command-line flags on top of the loaded configuration
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(question) = &cli.question {
        config.question.clone_from(question);
    }

    if let Some(k) = cli.k {
        config.retrieval.k = k;
    }

    if cli.overrides_sources() {
        config.sources.web_pages = cli.urls.clone();
        config.sources.sitemaps = cli
            .sitemaps
            .iter()
            .map(|url| SitemapSourceConfig::new(url.clone()))
            .collect();
    }
}
