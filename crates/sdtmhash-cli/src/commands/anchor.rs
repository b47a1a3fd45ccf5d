//! Anchor command implementation.

use crate::error::CliError;
use crate::output;
use chrono::{SecondsFormat, Utc};
use sdtmhash_canonical::{
    ByteDigester, DatasetAnchor, DatasetVersion, DigestConfig, DomainCode, Timestamp,
};
use std::path::Path;

pub fn run(
    path: String,
    domain: String,
    version: String,
    created_at: Option<String>,
    config: DigestConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let domain = DomainCode::parse(domain)?;
    let version = DatasetVersion::parse(version)?;
    let created_at = match created_at {
        Some(ts) => Timestamp::parse(ts)?,
        None => Timestamp::parse(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))?,
    };
    let file_name = Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::NoFileName(path.clone()))?
        .to_string();

    let sha256 = ByteDigester::new(config).digest_path(&path)?.digest;

    let anchor = DatasetAnchor {
        domain,
        version,
        file_name,
        sha256,
        created_at,
    };
    println!("{}", output::format_anchor(&anchor));
    Ok(())
}
