use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Overrides};
use crate::injector::inject_tree;

#[derive(Parser, Debug)]
#[command(
    name = "import-injector",
    version,
    about = "Insert a missing import into every matching source file"
)]
struct Cli {
    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML file with an [import_injector] table
    /// (defaults to ./import_injector.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the pattern and depths are relative to
    #[arg(long)]
    root: Option<PathBuf>,

    /// Recursive glob selecting the files to update
    #[arg(long)]
    pattern: Option<String>,

    /// Substring whose presence means the import is already there
    #[arg(long)]
    marker: Option<String>,

    /// Module path placed after the computed ../ prefix
    #[arg(long)]
    target: Option<String>,

    /// Directories below the root that do not add a ../ segment
    #[arg(long)]
    depth_offset: Option<usize>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            pattern: self.pattern.clone(),
            marker: self.marker.clone(),
            target: self.target.clone(),
            depth_offset: self.depth_offset,
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // Status lines own stdout; diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    let cfg = AppConfig::load(cli.config.as_deref(), cli.overrides())
        .context("failed to load config")?;
    tracing::debug!(?cfg, "config resolved");

    let mut stdout = BufWriter::new(std::io::stdout());
    // Per-file failures are part of the report, not of the exit code.
    inject_tree(&cfg, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = Cli::try_parse_from(args.into_iter().map(Into::into))?;
    run(cli)
}
