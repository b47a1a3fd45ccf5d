use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::validation::ValidationError;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("invalid regex")
    })
}

/// A parsed document node.
///
/// Mappings keep their keys in a [`BTreeMap`], so iteration is always in
/// byte-wise key order and duplicate keys collapse to the last occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or floating number.
    Number(Number),
    /// Unicode string.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<DocumentValue>),
    /// String-keyed mapping.
    Mapping(BTreeMap<String, DocumentValue>),
}

/// A document number.
///
/// Integers keep their full decimal text, so arbitrarily large values survive
/// untouched. Anything written with a fraction or an exponent is a binary64
/// float and is always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Number(N);

#[derive(Debug, Clone, PartialEq)]
enum N {
    Integer(String),
    Float(f64),
}

/// Borrowed view of a number, for serializers.
pub(crate) enum NumberRepr<'a> {
    Integer(&'a str),
    Float(f64),
}

impl Number {
    /// Classifies a JSON number token.
    ///
    /// `12` is an integer; `12.0`, `1.2e1` and `120E-1` are floats.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PatternMismatch`] if `token` is not JSON
    /// number syntax, or [`ValidationError::NonFiniteNumber`] if a float token
    /// overflows binary64.
    pub fn from_token(token: &str) -> Result<Self, ValidationError> {
        if !number_pattern().is_match(token) {
            return Err(ValidationError::PatternMismatch {
                field: "number",
                value: token.to_string(),
            });
        }
        if token.contains(&['.', 'e', 'E'][..]) {
            let value: f64 = token.parse().map_err(|_| ValidationError::PatternMismatch {
                field: "number",
                value: token.to_string(),
            })?;
            return Self::from_f64(value)
                .ok_or_else(|| ValidationError::NonFiniteNumber(token.to_string()));
        }
        let digits = if token == "-0" { "0" } else { token };
        Ok(Number(N::Integer(digits.to_string())))
    }

    /// Wraps a float. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Number(N::Float(value)))
    }

    /// True when the number was written without fraction or exponent.
    pub fn is_integer(&self) -> bool {
        matches!(self.0, N::Integer(_))
    }

    /// Decimal text of an integer, or `None` for floats.
    pub fn as_integer_str(&self) -> Option<&str> {
        match &self.0 {
            N::Integer(digits) => Some(digits),
            N::Float(_) => None,
        }
    }

    pub(crate) fn repr(&self) -> NumberRepr<'_> {
        match &self.0 {
            N::Integer(digits) => NumberRepr::Integer(digits),
            N::Float(value) => NumberRepr::Float(*value),
        }
    }

    /// The float value, or `None` for integers.
    pub fn as_float(&self) -> Option<f64> {
        match self.0 {
            N::Float(value) => Some(value),
            N::Integer(_) => None,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number(N::Integer(value.to_string()))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number(N::Integer(value.to_string()))
    }
}

impl From<bool> for DocumentValue {
    fn from(value: bool) -> Self {
        DocumentValue::Bool(value)
    }
}

impl From<i64> for DocumentValue {
    fn from(value: i64) -> Self {
        DocumentValue::Number(value.into())
    }
}

impl From<Number> for DocumentValue {
    fn from(value: Number) -> Self {
        DocumentValue::Number(value)
    }
}

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        DocumentValue::String(value.to_string())
    }
}

impl From<String> for DocumentValue {
    fn from(value: String) -> Self {
        DocumentValue::String(value)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(value: Vec<DocumentValue>) -> Self {
        DocumentValue::Sequence(value)
    }
}

impl From<BTreeMap<String, DocumentValue>> for DocumentValue {
    fn from(value: BTreeMap<String, DocumentValue>) -> Self {
        DocumentValue::Mapping(value)
    }
}

impl TryFrom<Value> for DocumentValue {
    type Error = ValidationError;

    /// Converts a parsed JSON tree.
    ///
    /// Number classification relies on `serde_json`'s `arbitrary_precision`
    /// feature, which keeps each number token exactly as written.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => DocumentValue::Null,
            Value::Bool(b) => DocumentValue::Bool(b),
            Value::Number(n) => DocumentValue::Number(Number::from_token(&n.to_string())?),
            Value::String(s) => DocumentValue::String(s),
            Value::Array(items) => DocumentValue::Sequence(
                items
                    .into_iter()
                    .map(DocumentValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => DocumentValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| DocumentValue::try_from(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_float_tokens_are_distinguished() {
        assert!(Number::from_token("1").unwrap().is_integer());
        assert!(!Number::from_token("1.0").unwrap().is_integer());
        assert!(!Number::from_token("1e0").unwrap().is_integer());
        assert_eq!(Number::from_token("1E2").unwrap().as_float(), Some(100.0));
    }

    #[test]
    fn big_integers_keep_every_digit() {
        let token = "123456789012345678901234567890";
        assert_eq!(
            Number::from_token(token).unwrap().as_integer_str(),
            Some(token)
        );
    }

    #[test]
    fn negative_zero_integer_normalizes() {
        assert_eq!(Number::from_token("-0").unwrap().as_integer_str(), Some("0"));
    }

    #[test]
    fn rejects_non_json_tokens() {
        for token in ["01", "+1", "1.", ".5", "NaN", "Infinity", "0x10", ""] {
            assert!(
                matches!(
                    Number::from_token(token),
                    Err(ValidationError::PatternMismatch { .. })
                ),
                "{token}"
            );
        }
    }

    #[test]
    fn rejects_overflowing_floats() {
        assert_eq!(
            Number::from_token("1e400"),
            Err(ValidationError::NonFiniteNumber("1e400".into()))
        );
        assert!(Number::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn converts_from_json_tree() {
        let value: Value = serde_json::from_str(r#"{"b":[1,2.5,null],"a":"x"}"#).unwrap();
        let doc = DocumentValue::try_from(value).unwrap();
        let DocumentValue::Mapping(map) = doc else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            map["b"],
            DocumentValue::Sequence(vec![
                DocumentValue::from(1i64),
                DocumentValue::Number(Number::from_f64(2.5).unwrap()),
                DocumentValue::Null,
            ])
        );
    }
}
