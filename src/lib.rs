// Module declarations
pub(crate) mod cli;
pub mod config;
pub mod injector;
pub(crate) mod report;

// Re-export main CLI functions
use anyhow::Result;

pub use config::{AppConfig, Overrides};
pub use injector::{Outcome, Summary, inject_tree, process_file};

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
