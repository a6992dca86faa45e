//! Watchtower CLI - offline audit tools for exported case files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use watchtower::WatchtowerConfig;

mod commands;

#[derive(Parser)]
#[command(name = "watchtower")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the claims of two runs
    DiffRuns {
        /// Earlier run: a JSON case file or an array of claims
        before: PathBuf,

        /// Later run: a JSON case file or an array of claims
        after: PathBuf,
    },

    /// Compare two serialized artifacts
    DiffArtifacts {
        a: PathBuf,
        b: PathBuf,
    },

    /// Generate alerts for a run, optionally against a previous one
    Alerts {
        /// Current run: a JSON case file or an array of claims
        current: PathBuf,

        /// Previous run to compare confidence against
        #[arg(short, long)]
        previous: Option<PathBuf>,
    },

    /// Recompute every hash in a JSON case file
    Verify {
        case: PathBuf,
    },

    /// Walk through a sample investigation in memory
    Demo {
        /// Also write the Markdown case file here
        #[arg(short, long)]
        markdown: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => WatchtowerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WatchtowerConfig::default(),
    };

    // Execute command
    match cli.command {
        Commands::DiffRuns { before, after } => {
            commands::diff_runs::execute(&before, &after)?;
        }
        Commands::DiffArtifacts { a, b } => {
            commands::diff_artifacts::execute(&a, &b)?;
        }
        Commands::Alerts { current, previous } => {
            commands::alerts::execute(&config, &current, previous.as_deref())?;
        }
        Commands::Verify { case } => {
            if !commands::verify::execute(&case)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Demo { markdown } => {
            commands::demo::execute(config, markdown.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
