//! Generic JSON tree types.
//!
//! This module defines the [`Value`] enum built by
//! [`Reader::parse_element`](crate::Reader::parse_element) and the
//! [`Number`] wrapper that carries numeric leaves as their verbatim source
//! lexemes.

use indexmap::IndexMap;

/// Object members, in insertion order.
pub type Map = IndexMap<String, Value>;

/// Array items.
pub type Array = Vec<Value>;

/// A number carried as its verbatim source lexeme.
///
/// The sign, digits, decimal point, exponent, and any `0x` prefix are
/// preserved exactly as written; conversion to a binary representation is
/// deferred until one of the `as_*` accessors (or the serde projection)
/// asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(pub(crate) String);

impl Number {
    /// Wraps a lexeme without validating it.
    #[must_use]
    pub fn from_lexeme(lexeme: impl Into<String>) -> Self {
        Self(lexeme.into())
    }

    /// The verbatim lexical form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the lexeme has neither a decimal point nor an exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        let digits = self.0.strip_prefix(['-', '+']).unwrap_or(&self.0);
        if digits.starts_with("0x") || digits.starts_with("0X") {
            return true;
        }
        !self.0.contains(['.', 'e', 'E'])
    }

    /// The lexeme as an `i64`, if it is integral and in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match split_hex(&self.0) {
            Some((negative, digits)) => {
                let magnitude = i64::from_str_radix(digits, 16).ok()?;
                if negative { magnitude.checked_neg() } else { Some(magnitude) }
            }
            None => self.0.parse().ok(),
        }
    }

    /// The lexeme as a `u64`, if it is integral, non-negative, and in range.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match split_hex(&self.0) {
            Some((false, digits)) => u64::from_str_radix(digits, 16).ok(),
            Some((true, _)) => None,
            None => self.0.parse().ok(),
        }
    }

    /// The lexeme as an `f64`.
    ///
    /// Integral, fractional, exponential, and hexadecimal forms all
    /// convert; returns `None` only for lexemes no accessor understands.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match split_hex(&self.0) {
            Some((negative, digits)) => {
                let magnitude = u64::from_str_radix(digits, 16).ok()? as f64;
                Some(if negative { -magnitude } else { magnitude })
            }
            None => self.0.parse().ok(),
        }
    }
}

fn split_hex(lexeme: &str) -> Option<(bool, &str)> {
    let (negative, rest) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme.strip_prefix('+').unwrap_or(lexeme)),
    };
    rest.strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .map(|digits| (negative, digits))
}

/// A value in a parsed JSON-dialect document.
///
/// # Examples
///
/// ```
/// use jsonlect::{Options, Reader, Value};
///
/// let mut reader = Reader::from_str(r#"{"key": [1, true]}"#, Options::json());
/// let value = reader.parse_element(true).unwrap();
/// assert!(value.is_object());
/// assert_eq!(value.get("key").and_then(|v| v.get_index(1)), Some(&Value::Bool(true)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The JSON `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A numeric leaf, carried as its verbatim lexeme.
    Number(Number),
    /// A string.
    String(String),
    /// An array of values.
    Array(Array),
    /// An object; members keep their insertion order.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Shorthand for `as_number` followed by [`Number::as_f64`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Shorthand for `as_number` followed by [`Number::as_i64`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up an object member by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an array item by index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal.
///
/// Writes to the provided formatter, replacing quotes, backslashes, control
/// characters, and the Unicode line separators with their JSON escape
/// sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            // Escape Unicode line separators which pre-2019 JSON parsers may
            // not handle correctly.
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

// The manual impl is needed because numeric leaves are lexemes: integral
// forms serialize as integers, everything else converts through f64, and a
// lexeme no accessor understands falls back to its verbatim text.
#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.is_integer() {
                    if let Some(i) = n.as_i64() {
                        return serializer.serialize_i64(i);
                    }
                    if let Some(u) = n.as_u64() {
                        return serializer.serialize_u64(u);
                    }
                }
                match n.as_f64() {
                    Some(f) => serializer.serialize_f64(f),
                    None => serializer.serialize_str(n.as_str()),
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            // The lexeme is written back verbatim; under non-JSON dialects
            // it may carry hex or trailing-dot forms.
            Value::Number(n) => f.write_str(n.as_str()),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for v in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
