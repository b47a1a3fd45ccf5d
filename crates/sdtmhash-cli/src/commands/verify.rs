//! Verify command implementation.

use crate::error::CliError;
use sdtmhash_canonical::{digest_path, Digest, DigestConfig, DigestMode};
use tracing::warn;

pub fn run(
    mode: String,
    path: String,
    expected: String,
    config: DigestConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode: DigestMode = mode.parse()?;
    let expected = Digest::from_hex(&expected)?;

    let actual = digest_path(mode, &path, config)?.digest();
    if actual != expected {
        warn!(path = %path, %expected, %actual, "digest mismatch");
        return Err(CliError::DigestMismatch {
            path,
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        }
        .into());
    }

    println!("OK {}", path);
    Ok(())
}
