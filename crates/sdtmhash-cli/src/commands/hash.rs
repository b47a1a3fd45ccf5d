//! Hash command implementation.

use crate::output;
use sdtmhash_canonical::{digest_path, DigestConfig, DigestMode};
use std::time::Instant;
use tracing::info;

pub fn run(
    mode: String,
    path: String,
    show_canonical: bool,
    config: DigestConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Reject unknown modes before touching the filesystem
    let mode: DigestMode = mode.parse()?;

    let started = Instant::now();
    let outcome = digest_path(mode, &path, config)?;
    let elapsed = started.elapsed();
    info!(%mode, path = %path, digest = %outcome.digest(), "digest computed");

    println!("{}", output::digest_line(&path, &outcome.digest()));
    if show_canonical {
        if let Some(canonical) = outcome.canonical() {
            println!("{}", canonical);
        }
    }
    println!("{}", output::elapsed_line(elapsed));
    Ok(())
}
