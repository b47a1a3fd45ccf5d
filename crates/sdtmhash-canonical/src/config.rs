use crate::validation::ValidationError;

/// Default read window, 8 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;
/// Largest read window a digester will allocate.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Tunables shared by [`ByteDigester`](crate::ByteDigester) and
/// [`Canonicalizer`](crate::Canonicalizer).
///
/// None of these settings affect the digest value; they only bound memory
/// and the number of read calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestConfig {
    chunk_size: usize,
}

impl DigestConfig {
    /// Builds a configuration with the given read window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] unless
    /// `1 <= chunk_size <= MAX_CHUNK_SIZE`.
    pub fn new(chunk_size: usize) -> Result<Self, ValidationError> {
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(ValidationError::OutOfBounds {
                field: "chunk_size",
                value: chunk_size as u64,
                min: 1,
                max: MAX_CHUNK_SIZE as u64,
            });
        }
        Ok(Self { chunk_size })
    }

    /// Size of each read issued against a byte source.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_8k() {
        assert_eq!(DigestConfig::default().chunk_size(), 8192);
    }

    #[test]
    fn rejects_zero_and_oversized_windows() {
        assert!(matches!(
            DigestConfig::new(0),
            Err(ValidationError::OutOfBounds { value: 0, .. })
        ));
        assert!(DigestConfig::new(MAX_CHUNK_SIZE + 1).is_err());
        assert_eq!(DigestConfig::new(1).unwrap().chunk_size(), 1);
        assert_eq!(
            DigestConfig::new(MAX_CHUNK_SIZE).unwrap().chunk_size(),
            MAX_CHUNK_SIZE
        );
    }
}
