//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use output::progress::{create_progress_bar, create_spinner, ProgressBarExt};
pub use types::Cli;

/// Report a fatal error on stderr and exit with status 1
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
