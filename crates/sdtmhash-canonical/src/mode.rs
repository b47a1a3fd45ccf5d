use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::canonicalizer::{CanonicalBytes, Canonicalizer, DocumentDigest};
use crate::config::DigestConfig;
use crate::digest::Digest;
use crate::digester::{ByteDigest, ByteDigester};
use crate::errors::DigestError;

/// How a source is interpreted before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestMode {
    /// Hash the raw bytes (`csv`, `bytes`, `raw`).
    Bytes,
    /// Parse as JSON and hash the canonical form (`json`, `document`).
    Document,
}

impl FromStr for DigestMode {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" | "bytes" | "raw" => Ok(DigestMode::Bytes),
            "json" | "document" => Ok(DigestMode::Document),
            other => Err(DigestError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for DigestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigestMode::Bytes => "csv",
            DigestMode::Document => "json",
        })
    }
}

/// Result of [`digest_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutcome {
    /// Raw byte-stream digest.
    Bytes(ByteDigest),
    /// Canonical document digest.
    Document(DocumentDigest),
}

impl DigestOutcome {
    /// The digest, whichever mode produced it.
    pub fn digest(&self) -> Digest {
        match self {
            DigestOutcome::Bytes(b) => b.digest,
            DigestOutcome::Document(d) => d.digest,
        }
    }

    /// Canonical bytes, for document digests only.
    pub fn canonical(&self) -> Option<&CanonicalBytes> {
        match self {
            DigestOutcome::Bytes(_) => None,
            DigestOutcome::Document(d) => Some(&d.canonical),
        }
    }

    /// Mode that produced this outcome.
    pub fn mode(&self) -> DigestMode {
        match self {
            DigestOutcome::Bytes(_) => DigestMode::Bytes,
            DigestOutcome::Document(_) => DigestMode::Document,
        }
    }
}

/// Digests `path` in the given mode.
///
/// # Errors
///
/// [`DigestError::SourceUnavailable`] or, in document mode,
/// [`DigestError::MalformedDocument`].
pub fn digest_path<P: AsRef<Path>>(
    mode: DigestMode,
    path: P,
    config: DigestConfig,
) -> Result<DigestOutcome, DigestError> {
    match mode {
        DigestMode::Bytes => ByteDigester::new(config)
            .digest_path(path)
            .map(DigestOutcome::Bytes),
        DigestMode::Document => Canonicalizer::new(config)
            .digest_path(path)
            .map(DigestOutcome::Document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("csv".parse::<DigestMode>().unwrap(), DigestMode::Bytes);
        assert_eq!("raw".parse::<DigestMode>().unwrap(), DigestMode::Bytes);
        assert_eq!("json".parse::<DigestMode>().unwrap(), DigestMode::Document);
        assert_eq!(DigestMode::Document.to_string(), "json");
    }

    #[test]
    fn unknown_mode_is_unsupported() {
        for mode in ["xml", "CSV", ""] {
            assert!(matches!(
                mode.parse::<DigestMode>(),
                Err(DigestError::UnsupportedMode(m)) if m == mode
            ));
        }
    }
}
