use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::config::DigestConfig;
use crate::digest::Digest;
use crate::digester::{ByteDigester, STREAM_LABEL};
use crate::errors::DigestError;
use crate::value::{DocumentValue, Number, NumberRepr};

/// Canonical serialized form of a [`DocumentValue`].
///
/// Always pure ASCII: every non-ASCII character is written as a `\uXXXX`
/// escape.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Borrows the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Borrows the canonical form as text.
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written by the serializer.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Number of canonical bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the canonical form is empty. Never the case for a parsed value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Takes ownership of the underlying buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalBytes({})", self.as_str())
    }
}

/// Digest of a structured document plus the bytes that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDigest {
    /// SHA-256 over `canonical`.
    pub digest: Digest,
    /// Canonical serialization of the parsed document.
    pub canonical: CanonicalBytes,
}

/// Parses JSON documents and emits deterministic bytes for hashing.
///
/// The canonical form sorts mapping keys byte-wise, drops all insignificant
/// whitespace, keeps integers and floats distinct, and escapes strings to
/// pure ASCII. It is byte-compatible with Python's
/// `json.dumps(obj, sort_keys=True, separators=(",", ":"))`.
///
/// # Example
///
/// ```rust
/// use sdtmhash_canonical::Canonicalizer;
///
/// let canonicalizer = Canonicalizer::default();
/// let value = canonicalizer.parse(br#"{"b": 2, "a": 1}"#)?;
/// assert_eq!(canonicalizer.canonicalize(&value).as_str(), r#"{"a":1,"b":2}"#);
/// # Ok::<(), sdtmhash_canonical::DigestError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    digester: ByteDigester,
}

impl Canonicalizer {
    /// Creates a canonicalizer whose hashing step uses `config`.
    pub fn new(config: DigestConfig) -> Self {
        Self {
            digester: ByteDigester::new(config),
        }
    }

    /// Parses a complete JSON text into a document tree.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::MalformedDocument`] on any syntax violation,
    /// including trailing content, invalid escapes, invalid UTF-8, and
    /// numbers that overflow binary64.
    pub fn parse(&self, input: &[u8]) -> Result<DocumentValue, DigestError> {
        parse_labeled(input, STREAM_LABEL)
    }

    /// Serializes `value` into its canonical bytes.
    pub fn canonicalize(&self, value: &DocumentValue) -> CanonicalBytes {
        let mut out = Vec::new();
        write_value(&mut out, value);
        CanonicalBytes(out)
    }

    /// Canonicalizes and hashes an in-memory value.
    pub fn digest_value(&self, value: &DocumentValue) -> Result<DocumentDigest, DigestError> {
        self.digest_canonical(self.canonicalize(value), STREAM_LABEL)
    }

    /// Reads, parses, canonicalizes and hashes a document stream.
    ///
    /// # Errors
    ///
    /// [`DigestError::SourceUnavailable`] if reading fails,
    /// [`DigestError::MalformedDocument`] if the text does not parse.
    pub fn digest_reader<R: Read>(&self, reader: R) -> Result<DocumentDigest, DigestError> {
        self.digest_labeled(reader, STREAM_LABEL)
    }

    /// Opens `path` and digests it as a document.
    ///
    /// # Errors
    ///
    /// See [`Canonicalizer::digest_reader`].
    pub fn digest_path<P: AsRef<Path>>(&self, path: P) -> Result<DocumentDigest, DigestError> {
        let label = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(|e| DigestError::unavailable(&label, e))?;
        debug!(path = %label, "opened document source");
        self.digest_labeled(file, &label)
    }

    fn digest_labeled<R: Read>(
        &self,
        mut reader: R,
        label: &str,
    ) -> Result<DocumentDigest, DigestError> {
        let mut text = Vec::new();
        reader
            .read_to_end(&mut text)
            .map_err(|e| DigestError::unavailable(label, e))?;
        let value = parse_labeled(&text, label)?;
        self.digest_canonical(self.canonicalize(&value), label)
    }

    fn digest_canonical(
        &self,
        canonical: CanonicalBytes,
        label: &str,
    ) -> Result<DocumentDigest, DigestError> {
        let hashed = self.digester.digest_labeled(canonical.as_bytes(), label)?;
        debug!(
            source = label,
            canonical_len = canonical.len(),
            digest = %hashed.digest,
            "document digest complete"
        );
        Ok(DocumentDigest {
            digest: hashed.digest,
            canonical,
        })
    }
}

fn parse_labeled(input: &[u8], label: &str) -> Result<DocumentValue, DigestError> {
    let tree: Value =
        serde_json::from_slice(input).map_err(|e| DigestError::malformed(label, e))?;
    DocumentValue::try_from(tree).map_err(|e| DigestError::malformed(label, e))
}

fn write_value(out: &mut Vec<u8>, value: &DocumentValue) {
    match value {
        DocumentValue::Null => out.extend_from_slice(b"null"),
        DocumentValue::Bool(true) => out.extend_from_slice(b"true"),
        DocumentValue::Bool(false) => out.extend_from_slice(b"false"),
        DocumentValue::Number(n) => write_number(out, n),
        DocumentValue::String(s) => write_string(out, s),
        DocumentValue::Sequence(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item);
            }
            out.push(b']');
        }
        DocumentValue::Mapping(entries) => {
            out.push(b'{');
            // BTreeMap<String, _> iterates in byte-wise key order.
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(out, key);
                out.push(b':');
                write_value(out, item);
            }
            out.push(b'}');
        }
    }
}

fn write_number(out: &mut Vec<u8>, n: &Number) {
    match n.repr() {
        NumberRepr::Integer(digits) => out.extend_from_slice(digits.as_bytes()),
        NumberRepr::Float(value) => out.extend_from_slice(format_float(value).as_bytes()),
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\u{08}' => out.extend_from_slice(b"\\b"),
            '\u{0c}' => out.extend_from_slice(b"\\f"),
            ' '..='~' => out.push(ch as u8),
            _ => {
                let mut units = [0u16; 2];
                for &unit in ch.encode_utf16(&mut units).iter() {
                    out.extend_from_slice(b"\\u");
                    for shift in [12u32, 8, 4, 0] {
                        out.push(HEX_DIGITS[usize::from((unit >> shift) & 0xf)]);
                    }
                }
            }
        }
    }
    out.push(b'"');
}

/// Renders a finite float as its shortest round-trip decimal.
///
/// Positional notation for decimal exponents in `-4..16` (integral values get
/// a trailing `.0`), otherwise `d.ddde±XX` with at least two exponent digits.
pub(crate) fn format_float(value: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. `1.2345e2`, `5e-324`.
    let scientific = format!("{:e}", value.abs());
    let mut digits = String::with_capacity(scientific.len());
    let mut chars = scientific.chars();
    for c in chars.by_ref() {
        match c {
            'e' => break,
            '.' => {}
            d => digits.push(d),
        }
    }
    let mut exponent: i32 = 0;
    let mut negative_exponent = false;
    for c in chars {
        match c {
            '-' => negative_exponent = true,
            d => exponent = exponent * 10 + i32::from(d as u8 - b'0'),
        }
    }
    if negative_exponent {
        exponent = -exponent;
    }

    let mut text = String::with_capacity(digits.len() + 8);
    if value.is_sign_negative() {
        text.push('-');
    }
    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        if point <= 0 {
            text.push_str("0.");
            text.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
            text.push_str(&digits);
        } else {
            let point = point as usize;
            if digits.len() <= point {
                text.push_str(&digits);
                text.extend(std::iter::repeat('0').take(point - digits.len()));
                text.push_str(".0");
            } else {
                text.push_str(&digits[..point]);
                text.push('.');
                text.push_str(&digits[point..]);
            }
        }
    } else {
        text.push_str(&digits[..1]);
        if digits.len() > 1 {
            text.push('.');
            text.push_str(&digits[1..]);
        }
        text.push('e');
        text.push(if exponent < 0 { '-' } else { '+' });
        text.push_str(&format!("{:02}", exponent.unsigned_abs()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(input: &str) -> String {
        let canonicalizer = Canonicalizer::default();
        let value = canonicalizer.parse(input.as_bytes()).unwrap();
        canonicalizer.canonicalize(&value).as_str().to_string()
    }

    #[test]
    fn float_rendering_matches_shortest_repr() {
        let cases = [
            (1.0, "1.0"),
            (0.0, "0.0"),
            (-0.0, "-0.0"),
            (0.1, "0.1"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (1.5e-5, "1.5e-05"),
            (123.456, "123.456"),
            (-2.5, "-2.5"),
            (1e15, "1000000000000000.0"),
            (1e16, "1e+16"),
            (1.2345e20, "1.2345e+20"),
            (5e-324, "5e-324"),
            (f64::MAX, "1.7976931348623157e+308"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_float(value), expected, "{value:?}");
        }
    }

    #[test]
    fn equal_floats_written_differently_collapse() {
        for input in ["1.0", "1.00", "1e0", "10E-1", "0.1e1"] {
            assert_eq!(canon(input), "1.0", "{input}");
        }
        assert_eq!(canon("1"), "1");
    }

    #[test]
    fn strings_escape_to_ascii() {
        assert_eq!(canon(r#""a\"b\\c""#), r#""a\"b\\c""#);
        assert_eq!(canon(r#""\n\r\t\b\f""#), r#""\n\r\t\b\f""#);
        assert_eq!(canon(r#""\u0001\u001f\u007f""#), r#""\u0001\u001f\u007f""#);
        assert_eq!(canon("\"caf\u{e9}\""), r#""caf\u00e9""#);
        assert_eq!(canon("\"\u{1f600}\""), r#""\ud83d\ude00""#);
        assert_eq!(canon(r#""a\/b""#), r#""a/b""#);
    }

    #[test]
    fn empty_containers() {
        assert_eq!(canon(" { } "), "{}");
        assert_eq!(canon("[ ]"), "[]");
        assert_eq!(canon(r#"{"a":[],"b":{}}"#), r#"{"a":[],"b":{}}"#);
    }

    #[test]
    fn keys_sort_bytewise_not_by_locale() {
        assert_eq!(
            canon(r#"{"b":1,"B":2,"a":3,"\u00e9":4,"_":5}"#),
            r#"{"B":2,"_":5,"a":3,"b":1,"\u00e9":4}"#
        );
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        assert_eq!(canon(r#"{"a":1,"a":2}"#), r#"{"a":2}"#);
    }

    #[test]
    fn scalar_roots_are_allowed() {
        assert_eq!(canon(" true "), "true");
        assert_eq!(canon("null"), "null");
        assert_eq!(canon(r#""x""#), r#""x""#);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let canonicalizer = Canonicalizer::default();
        let inputs: [&[u8]; 10] = [
            b"",
            b"{\"a\":1,}",
            b"{\"a\":1",
            b"[1,2",
            b"{\"a\":1} x",
            b"\"\\x\"",
            b"\"\\ud800\"",
            b"NaN",
            b"1e400",
            b"\xef\xbb\xbf{}",
        ];
        for input in inputs {
            let err = canonicalizer.parse(input).unwrap_err();
            assert!(
                matches!(err, DigestError::MalformedDocument { .. }),
                "{:?}: {err}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let depth = 200;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let err = Canonicalizer::default().parse(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DigestError::MalformedDocument { .. }));
    }
}
