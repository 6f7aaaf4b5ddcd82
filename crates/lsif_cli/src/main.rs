//! Command-line driver for the LSIF hover pipeline.
//!
//! Provides `lsif hover` for streaming a dump through the reference resolver
//! and querying hover contents, and `lsif checksum` for computing upload
//! digests of a file in one pass.

#![warn(missing_docs)]

mod checksum;
mod hover;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use lsif_common::Id;
use lsif_config::Config;

/// Streaming hover resolution for LSIF dumps.
#[derive(Parser, Debug)]
#[command(name = "lsif", version, about = "LSIF hover resolver")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `lsif.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest a dump and print hover contents for references.
    Hover(HoverArgs),
    /// Compute upload checksums of a file.
    Checksum(ChecksumArgs),
}

/// Arguments for the `lsif hover` subcommand.
#[derive(Parser, Debug)]
pub struct HoverArgs {
    /// Newline-delimited JSON dump to ingest.
    pub dump: PathBuf,

    /// Reference ids to resolve. Without any, only ingest statistics are
    /// reported.
    #[arg(short, long = "reference", num_args = 1..)]
    pub references: Vec<Id>,

    /// Keep caches in memory instead of temporary files.
    #[arg(long)]
    pub memory: bool,
}

/// Arguments for the `lsif checksum` subcommand.
#[derive(Parser, Debug)]
pub struct ChecksumArgs {
    /// File to hash.
    pub file: PathBuf,

    /// Restrict digests to FIPS-approved algorithms.
    #[arg(long)]
    pub fips: bool,
}

/// Global settings derived from CLI flags and the configuration file.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// The loaded configuration.
    pub config: Config,
}

fn main() {
    let cli = Cli::parse();

    let config = match settings::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Hover(ref args) => hover::run(args, &global),
        Command::Checksum(ref args) => checksum::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
