use std::io;
use thiserror::Error;

/// Errors returned by the digest operations.
///
/// Every variant is terminal for the invocation that produced it: no partial
/// digest or canonical form is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The source could not be opened, or a read failed partway through.
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// Path (or stream label) of the source.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Structured input violates the document grammar or numeric policy.
    #[error("malformed document {path}: {reason}")]
    MalformedDocument {
        /// Path (or stream label) of the source.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The caller asked for a mode other than byte-stream or document.
    #[error("unsupported mode '{0}': expected csv|json")]
    UnsupportedMode(String),
}

impl DigestError {
    pub(crate) fn unavailable(path: &str, source: io::Error) -> Self {
        DigestError::SourceUnavailable {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn malformed(path: &str, reason: impl ToString) -> Self {
        DigestError::MalformedDocument {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
