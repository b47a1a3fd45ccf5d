use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a validated value from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    DomainCode,
    "SDTM dataset/domain code such as `DM`, `AE` or `SUPPQUAL`.",
    r"^[A-Z][A-Z0-9]{1,7}$"
);
newtype!(
    DatasetVersion,
    "Dataset version label such as `1.0` or `2024-03_r2`.",
    r"^[0-9A-Za-z][0-9A-Za-z._-]{0,31}$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_codes() {
        assert!(DomainCode::parse("DM").is_ok());
        assert!(DomainCode::parse("SUPPQUAL").is_ok());
        assert!(DomainCode::parse("dm").is_err());
        assert!(DomainCode::parse("D").is_err());
        assert!(DomainCode::parse("SUPPQUALX").is_err());
    }

    #[test]
    fn timestamps_require_utc_suffix() {
        assert!(Timestamp::parse("2025-06-01T12:00:00Z").is_ok());
        assert!(Timestamp::parse("2025-06-01T12:00:00.123Z").is_ok());
        assert!(Timestamp::parse("2025-06-01T12:00:00+02:00").is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<DatasetVersion>(r#""1.0""#).is_ok());
        assert!(serde_json::from_str::<DatasetVersion>(r#""../x""#).is_err());
    }
}
