//! sdtmhash CLI - digests SDTM dataset files and JSON payloads.

use clap::{Args, Parser, Subcommand};
use sdtmhash_canonical::{DigestConfig, DEFAULT_CHUNK_SIZE};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{anchor, canonicalize, hash, verify};

#[derive(Parser)]
#[command(name = "sdtmhash")]
#[command(about = "SHA-256 digests for SDTM datasets (raw bytes) and JSON documents (canonical form)")]
struct Cli {
    /// Log filter directive, e.g. `debug` or `sdtmhash_canonical=trace`
    #[arg(long, global = true, env = "SDTMHASH_LOG", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Read window in bytes (does not affect the digest)
    #[arg(long, env = "SDTMHASH_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<DigestConfig, Box<dyn std::error::Error>> {
        Ok(DigestConfig::new(self.chunk_size)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a file (mode: csv|json)
    Hash {
        /// Input kind: `csv` hashes raw bytes, `json` hashes the canonical form
        mode: String,
        /// Path to the input file
        path: String,
        /// Also print the canonical bytes (json mode only)
        #[arg(long)]
        show_canonical: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Check a file against a previously recorded digest
    Verify {
        /// Input kind: csv|json
        mode: String,
        /// Path to the input file
        path: String,
        /// Expected digest (64 lowercase hex characters)
        expected: String,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Emit a ledger anchor record for a dataset file
    Anchor {
        /// Path to the dataset file
        path: String,
        /// SDTM domain code, e.g. DM
        #[arg(long)]
        domain: String,
        /// Dataset version label, e.g. 1.0
        #[arg(long)]
        dataset_version: String,
        /// Override the creation timestamp (RFC3339, UTC, `Z` suffix)
        #[arg(long)]
        created_at: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Hash {
            mode,
            path,
            show_canonical,
            config,
        } => config
            .resolve()
            .and_then(|config| hash::run(mode, path, show_canonical, config)),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Verify {
            mode,
            path,
            expected,
            config,
        } => config
            .resolve()
            .and_then(|config| verify::run(mode, path, expected, config)),
        Commands::Anchor {
            path,
            domain,
            dataset_version,
            created_at,
            config,
        } => config
            .resolve()
            .and_then(|config| anchor::run(path, domain, dataset_version, created_at, config)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
