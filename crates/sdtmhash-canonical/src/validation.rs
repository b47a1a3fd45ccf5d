use thiserror::Error;

/// Validation errors for digests, identifiers and configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A textual value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A numeric setting lies outside its accepted range.
    #[error("{field} ({value}) is out of bounds [{min}, {max}]")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },
    /// A number token does not fit in a finite binary64 float.
    #[error("number {0} is not finite")]
    NonFiniteNumber(String),
}
