use thiserror::Error;

/// CLI-level failures that are not digest errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// Recomputed digest differs from the recorded one.
    #[error("digest mismatch for {path}: expected {expected}, computed {actual}")]
    DigestMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// Anchor records need a bare UTF-8 file name.
    #[error("cannot derive a file name from {0}")]
    NoFileName(String),
}
