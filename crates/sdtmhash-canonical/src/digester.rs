use sha2::{Digest as Sha2Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use crate::config::DigestConfig;
use crate::digest::Digest;
use crate::errors::DigestError;

/// Label used in errors for sources that have no path.
pub(crate) const STREAM_LABEL: &str = "<stream>";

/// Digest of a raw byte source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteDigest {
    /// SHA-256 over every byte of the source, in order.
    pub digest: Digest,
    /// Number of bytes consumed.
    pub bytes_read: u64,
}

/// Streams a byte source through SHA-256 using a fixed read window.
///
/// Memory use is one window regardless of input size. The window size never
/// changes the resulting digest.
///
/// # Example
///
/// ```rust
/// use sdtmhash_canonical::ByteDigester;
///
/// let digester = ByteDigester::default();
/// let result = digester.digest_reader(&b""[..])?;
/// assert_eq!(
///     result.digest.to_hex(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// # Ok::<(), sdtmhash_canonical::DigestError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ByteDigester {
    config: DigestConfig,
}

impl ByteDigester {
    /// Creates a digester using the given configuration.
    pub fn new(config: DigestConfig) -> Self {
        Self { config }
    }

    /// Size of each read issued against the source.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size()
    }

    /// Digests everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::SourceUnavailable`] if a read fails.
    pub fn digest_reader<R: Read>(&self, reader: R) -> Result<ByteDigest, DigestError> {
        self.digest_labeled(reader, STREAM_LABEL)
    }

    /// Opens `path` and digests its contents.
    ///
    /// The file handle is dropped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::SourceUnavailable`] if the file cannot be opened
    /// or a read fails.
    pub fn digest_path<P: AsRef<Path>>(&self, path: P) -> Result<ByteDigest, DigestError> {
        let label = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(|e| DigestError::unavailable(&label, e))?;
        debug!(path = %label, "opened byte source");
        self.digest_labeled(file, &label)
    }

    pub(crate) fn digest_labeled<R: Read>(
        &self,
        mut reader: R,
        label: &str,
    ) -> Result<ByteDigest, DigestError> {
        let mut hasher = Sha256::new();
        let mut window = vec![0u8; self.config.chunk_size()];
        let mut bytes_read = 0u64;

        loop {
            match reader.read(&mut window) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&window[..n]);
                    bytes_read += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DigestError::unavailable(label, e)),
            }
        }

        let digest = Digest::from_bytes(hasher.finalize().into());
        debug!(source = label, bytes_read, %digest, "byte digest complete");
        Ok(ByteDigest { digest, bytes_read })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that yields some bytes, is interrupted once, then fails.
    struct Flaky {
        calls: usize,
        fail: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => {
                    buf[0] = b'a';
                    Ok(1)
                }
                2 => Err(io::Error::new(io::ErrorKind::Interrupted, "signal")),
                3 if self.fail => Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let digester = ByteDigester::default();
        let got = digester
            .digest_reader(Flaky {
                calls: 0,
                fail: false,
            })
            .unwrap();
        let expected = digester.digest_reader(&b"a"[..]).unwrap();
        assert_eq!(got, expected);
        assert_eq!(got.bytes_read, 1);
    }

    #[test]
    fn mid_stream_failure_is_source_unavailable() {
        let err = ByteDigester::default()
            .digest_reader(Flaky {
                calls: 0,
                fail: true,
            })
            .unwrap_err();
        match err {
            DigestError::SourceUnavailable { path, source } => {
                assert_eq!(path, STREAM_LABEL);
                assert_eq!(source.to_string(), "disk gone");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_byte_window_matches_default() {
        let data: Vec<u8> = (0..=255u8).cycle().take(20_000).collect();
        let tiny = ByteDigester::new(DigestConfig::new(1).unwrap());
        let default = ByteDigester::default();
        assert_eq!(
            tiny.digest_reader(data.as_slice()).unwrap(),
            default.digest_reader(data.as_slice()).unwrap()
        );
    }
}
