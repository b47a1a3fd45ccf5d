//! Content digests for clinical dataset files.
//!
//! Two kinds of input are supported:
//! - raw byte streams (SDTM `.csv` exports and the like), hashed as-is with
//!   SHA-256 in bounded memory;
//! - JSON documents, parsed and re-serialized into one canonical byte form
//!   before hashing, so key order and whitespace never change the digest.
//!
//! Both operations are pure functions of their input and share no state, so
//! they can run on any number of threads at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use sdtmhash_canonical::Canonicalizer;
//!
//! let canonicalizer = Canonicalizer::default();
//! let a = canonicalizer.digest_reader(&br#"{"b":2,"a":1}"#[..])?;
//! let b = canonicalizer.digest_reader(&br#"{"a": 1, "b": 2}"#[..])?;
//! assert_eq!(a.digest, b.digest);
//! assert_eq!(a.canonical.as_str(), r#"{"a":1,"b":2}"#);
//! # Ok::<(), sdtmhash_canonical::DigestError>(())
//! ```
#![deny(missing_docs)]

/// Ledger anchor records.
pub mod anchor;
/// Document parsing and canonical serialization.
pub mod canonicalizer;
/// Digester configuration.
pub mod config;
/// Digest value type.
pub mod digest;
/// Streaming byte digester.
pub mod digester;
/// Error taxonomy.
pub mod errors;
/// Validated identifiers used in anchor records.
pub mod identifiers;
/// Mode selection and dispatch.
pub mod mode;
/// Validation helpers.
pub mod validation;
/// Document value model.
pub mod value;

use std::path::Path;

pub use anchor::DatasetAnchor;
pub use canonicalizer::{CanonicalBytes, Canonicalizer, DocumentDigest};
pub use config::{DigestConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use digest::{Digest, DIGEST_LEN};
pub use digester::{ByteDigest, ByteDigester};
pub use errors::DigestError;
pub use identifiers::{DatasetVersion, DomainCode, Timestamp};
pub use mode::{digest_path, DigestMode, DigestOutcome};
pub use validation::ValidationError;
pub use value::{DocumentValue, Number};

/// Digests the raw bytes of the file at `path` with the default window.
pub fn digest_bytes<P: AsRef<Path>>(path: P) -> Result<Digest, DigestError> {
    ByteDigester::default()
        .digest_path(path)
        .map(|result| result.digest)
}

/// Digests the canonical form of the JSON document at `path`.
pub fn digest_document<P: AsRef<Path>>(path: P) -> Result<DocumentDigest, DigestError> {
    Canonicalizer::default().digest_path(path)
}
