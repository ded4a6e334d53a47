//! # filtergen CLI
//!
//! Generates DREAM3D filter plugins from ITK filter descriptor documents.
//!
//! ## Usage
//!
//! ```bash
//! filtergen generate -j json/ -d ITKImageProcessing/ --overwrite
//! filtergen validate -j json/ -n
//! filtergen -vv --config filtergen.yaml generate -j json/ -d plugin/ --dry-run
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use filtergen_cli::config;
use filtergen_cli::generate::{run_generate, GenerateArgs};
use filtergen_cli::pipeline::Tables;
use filtergen_cli::validate::{run_validate, ValidateArgs};

/// Filter generator: descriptor documents in, filter plugin sources out.
#[derive(Parser, Debug)]
#[command(name = "filtergen", version, about, long_about = None)]
struct Cli {
    /// Increase output verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file with output layout overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate filter sources, tests and documentation.
    Generate(GenerateArgs),

    /// Check descriptor documents without writing anything.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let config = config::load(cli.config.as_deref()).context("loading configuration")?;
    let tables = Tables::standard().context("building field schemas")?;

    match &cli.command {
        Commands::Generate(args) => run_generate(args, &config, &tables),
        Commands::Validate(args) => run_validate(args, &tables),
    }
}
