use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

use crate::validation::ValidationError;

/// Length in bytes of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex"))
}

/// A SHA-256 content digest.
///
/// Displays (and serializes) as 64 lowercase hex characters with no prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wraps raw hash output.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses the display form back into a digest.
    ///
    /// Only the canonical form is accepted: exactly 64 lowercase hex
    /// characters.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let mismatch = || ValidationError::PatternMismatch {
            field: "digest",
            value: value.to_string(),
        };
        if !hex_pattern().is_match(value) {
            return Err(mismatch());
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| mismatch())?;
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hex_round_trips() {
        let digest = Digest::from_hex(EMPTY_SHA256).unwrap();
        assert_eq!(digest.to_string(), EMPTY_SHA256);
        assert_eq!(digest.as_bytes()[0], 0xe3);
    }

    #[test]
    fn rejects_non_canonical_hex() {
        let upper = EMPTY_SHA256.to_uppercase();
        assert!(Digest::from_hex(&upper).is_err());
        assert!(Digest::from_hex(&EMPTY_SHA256[..63]).is_err());
        assert!(Digest::from_hex(&format!("0x{}", &EMPTY_SHA256[2..])).is_err());
    }

    #[test]
    fn serializes_as_bare_hex_string() {
        let digest = Digest::from_hex(EMPTY_SHA256).unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", EMPTY_SHA256));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
