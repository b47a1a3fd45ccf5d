//! Dataset anchor records.
//!
//! An anchor binds a dataset file to its digest so the pair can be registered
//! on a ledger. Building the record is pure; submitting it is the caller's job.

use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::identifiers::{DatasetVersion, DomainCode, Timestamp};

/// Ledger payload for anchoring one dataset file.
///
/// Serializes with the camelCase field names the ledger contract expects:
/// `domain`, `version`, `fileName`, `sha256`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAnchor {
    /// SDTM domain of the dataset, e.g. `DM`.
    pub domain: DomainCode,
    /// Dataset version label.
    pub version: DatasetVersion,
    /// Bare file name, without directories.
    pub file_name: String,
    /// Digest of the file contents.
    pub sha256: Digest,
    /// When the anchor was created.
    pub created_at: Timestamp,
}

impl DatasetAnchor {
    /// Compact JSON encoding of the record, in field declaration order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
