use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use covpkg::config::{Config, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "covpkg")]
#[command(about = "Per-package coverage report for Go coverage profiles")]
#[command(version)]
struct Cli {
    /// Coverage profile to read (default: coverage.out)
    input: Option<PathBuf>,

    /// Path to config file (default: covpkg.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Import path prefix whose child directories are packages
    #[arg(short, long)]
    prefix: Option<String>,

    /// Minimum coverage percentage for a package to count as good
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Log parsing details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => Config::load_or_default(&PathBuf::from(CONFIG_FILE))?,
    };

    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(prefix) = cli.prefix {
        config.package_prefix = prefix;
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    config.validate()?;

    let report = covpkg::build_report(&config)?;
    report.print();

    Ok(())
}
