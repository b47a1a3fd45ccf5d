//! Output formatting utilities.

use sdtmhash_canonical::{DatasetAnchor, Digest};
use std::time::Duration;

/// `SHA256(<path>)=<hex>`, the line format downstream anchoring scripts parse.
pub fn digest_line(path: &str, digest: &Digest) -> String {
    format!("SHA256({})={}", path, digest)
}

/// Wall-clock time of one digest, in milliseconds with two decimals.
pub fn elapsed_line(elapsed: Duration) -> String {
    format!("elapsed_ms={:.2}", elapsed.as_secs_f64() * 1000.0)
}

/// Anchor record as pretty JSON.
pub fn format_anchor(anchor: &DatasetAnchor) -> String {
    serde_json::to_string_pretty(anchor).unwrap_or_else(|_| "{}".to_string())
}
