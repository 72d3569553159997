//! doc-rag CLI entry point.

use clap::Parser;

use doc_rag::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = doc_rag::cli::commands::ask::execute(cli).await {
        doc_rag::cli::handle_error(err, json);
    }
}
