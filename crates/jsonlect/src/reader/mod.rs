//! The reader facade: construction, token streaming, tree parsing, and
//! navigation.

mod escape_buffer;
mod lexer;
mod literal_buffer;
mod tokens;

use std::io::{Read, Seek};

use crate::error::Result;
use crate::options::Options;
use crate::source::{ByteScalars, CharScalars, Encoding, ScalarSource, StreamScalars, TextScalars};
use crate::token::TokenKind;
use crate::value::Value;
pub use tokens::Tokens;

#[cfg(any(test, feature = "serde"))]
use crate::error::{Error, ErrorKind};

/// A pull-based reader over one JSON-dialect document.
///
/// A reader couples a [`ScalarSource`] cursor with the [`Options`] that
/// select the dialect. The same reader serves three consumption styles:
///
/// - **token mode**: [`read_element`](Reader::read_element) yields a lazy
///   stream of [`Token`](crate::Token)s with exact source spans;
/// - **tree mode**: [`parse_element`](Reader::parse_element) assembles the
///   generic [`Value`] tree;
/// - **navigation mode**: [`find_property`](Reader::find_property),
///   [`find_index`](Reader::find_index), and
///   [`read_element_length`](Reader::read_element_length) locate content
///   without materializing it.
///
/// # Examples
///
/// ```
/// use jsonlect::{Options, Reader};
///
/// let mut reader = Reader::from_str("{ a: 'hi' } // greeting", Options::json5());
/// let value = reader.parse_element(true).unwrap();
/// assert_eq!(value.get("a").and_then(|v| v.as_str()), Some("hi"));
/// ```
pub struct Reader<S> {
    pub(crate) source: S,
    pub(crate) options: Options,
}

impl<'a> Reader<TextScalars<'a>> {
    /// Creates a reader over a string slice.
    #[must_use]
    pub fn from_str(text: &'a str, options: Options) -> Self {
        Self::new(TextScalars::new(text), options)
    }
}

impl<'a> Reader<CharScalars<'a>> {
    /// Creates a reader over a pre-decoded scalar slice.
    #[must_use]
    pub fn from_scalars(scalars: &'a [char], options: Options) -> Self {
        Self::new(CharScalars::new(scalars), options)
    }
}

impl<'a> Reader<ByteScalars<'a>> {
    /// Creates a reader over a byte buffer, detecting the encoding from the
    /// byte order mark when none is declared.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8], encoding: Option<Encoding>, options: Options) -> Self {
        Self::new(ByteScalars::new(bytes, encoding), options)
    }
}

impl<R: Read + Seek> Reader<StreamScalars<R>> {
    /// Creates a reader over a seekable byte stream, detecting the encoding
    /// from the byte order mark when none is declared.
    ///
    /// # Errors
    ///
    /// Fails when the stream preamble cannot be read.
    pub fn from_stream(stream: R, encoding: Option<Encoding>, options: Options) -> Result<Self> {
        Ok(Self::new(StreamScalars::new(stream, encoding)?, options))
    }
}

impl<S: ScalarSource> Reader<S> {
    /// Creates a reader over any scalar source.
    pub fn new(source: S, options: Options) -> Self {
        Self { source, options }
    }

    /// The options this reader parses with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The cursor position, in the source's position unit.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Restores a position previously obtained from
    /// [`position`](Reader::position) or a token span.
    ///
    /// # Errors
    ///
    /// Fails when the position does not land on a scalar boundary of the
    /// underlying source.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        self.source.set_position(position)
    }

    /// Streams the tokens of one element.
    ///
    /// `is_root` enables root-only grammar (braceless objects under
    /// [`omitted_root_object_braces`](Options::omitted_root_object_braces)).
    /// The stream ends with the element's final token; after an error the
    /// error itself is the last item.
    pub fn read_element(&mut self, is_root: bool) -> Tokens<'_, S> {
        Tokens::new(self, is_root)
    }

    /// Parses one element into the generic [`Value`] tree.
    ///
    /// # Errors
    ///
    /// Returns the first token-level error of the element.
    pub fn parse_element(&mut self, is_root: bool) -> Result<Value> {
        let mut tokens = self.read_element(is_root);
        crate::tree::build_value(&mut tokens)
    }

    /// Parses one element and projects it into `T` through serde.
    ///
    /// Numbers reach the projection as verbatim lexemes and convert on
    /// demand, so hexadecimal and named floating-point forms deserialize
    /// into the numeric types they fit.
    ///
    /// # Errors
    ///
    /// Returns the first token-level error, or a
    /// [`Projection`](crate::ErrorKind::Projection) error when the tree
    /// does not fit `T`.
    #[cfg(any(test, feature = "serde"))]
    pub fn parse_element_as<T>(&mut self, is_root: bool) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self.parse_element(is_root)?;
        let position = self.source.position();
        T::deserialize(value)
            .map_err(|e| Error::new(ErrorKind::Projection(e.to_string()), position))
    }

    /// Parses the element starting at `position`, restoring the current
    /// cursor afterwards even when parsing fails.
    ///
    /// This is the explicit form of re-reading a token's span: pass a
    /// previously observed `Token::position`.
    ///
    /// # Errors
    ///
    /// Returns the first token-level error of the element.
    pub fn parse_element_at(&mut self, position: usize, is_root: bool) -> Result<Value> {
        let saved = self.source.position();
        self.source.set_position(position)?;
        let outcome = self.parse_element(is_root);
        let restored = self.source.set_position(saved);
        let value = outcome?;
        restored?;
        Ok(value)
    }

    /// Scans the top level of the document for a property named `name`.
    ///
    /// On success the cursor rests just past the property's colon, so the
    /// next [`parse_element`](Reader::parse_element) with `is_root = false`
    /// reads the value. Errors count as "not found"; the cursor is then
    /// wherever the scan stopped.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlect::{Options, Reader};
    ///
    /// let mut reader = Reader::from_str(r#"{"a": 1, "b": [2, 3]}"#, Options::json());
    /// assert!(reader.find_property("b", true));
    /// let b = reader.parse_element(false).unwrap();
    /// assert_eq!(b.get_index(0).and_then(|v| v.as_i64()), Some(2));
    /// ```
    pub fn find_property(&mut self, name: &str, is_root: bool) -> bool {
        let mut depth = 0usize;
        let mut tokens = self.read_element(is_root);
        for item in &mut tokens {
            let Ok(token) = item else { return false };
            match token.kind {
                TokenKind::StartObject | TokenKind::StartArray => depth += 1,
                TokenKind::EndObject | TokenKind::EndArray => depth = depth.saturating_sub(1),
                TokenKind::PropertyName if depth == 1 && token.value == name => return true,
                _ => {}
            }
        }
        false
    }

    /// Scans a top-level array for the element at `index` (zero-based).
    ///
    /// On success the cursor is repositioned to the element's first token,
    /// so the next [`parse_element`](Reader::parse_element) with
    /// `is_root = false` reads it. Returns `false` when the document is not
    /// an array, the index is out of range, or an error occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlect::{Options, Reader};
    ///
    /// let mut reader = Reader::from_str("[1, 4, 5]", Options::json());
    /// assert!(reader.find_index(2, true));
    /// assert_eq!(reader.parse_element(false).unwrap().as_i64(), Some(5));
    /// ```
    pub fn find_index(&mut self, index: usize, is_root: bool) -> bool {
        let mut depth = 0usize;
        let mut in_root_array = false;
        let mut counter = 0usize;
        let target = {
            let mut found = None;
            let mut tokens = self.read_element(is_root);
            for item in &mut tokens {
                let Ok(token) = item else { return false };
                match token.kind {
                    TokenKind::StartArray if depth == 0 => {
                        in_root_array = true;
                        depth = 1;
                    }
                    TokenKind::StartObject | TokenKind::StartArray => {
                        if depth == 1 && in_root_array {
                            if counter == index {
                                found = Some(token.position);
                                break;
                            }
                            counter += 1;
                        }
                        depth += 1;
                    }
                    TokenKind::EndObject | TokenKind::EndArray => {
                        depth = depth.saturating_sub(1);
                    }
                    kind if kind.is_primitive() && depth == 1 && in_root_array => {
                        if counter == index {
                            found = Some(token.position);
                            break;
                        }
                        counter += 1;
                    }
                    _ => {}
                }
            }
            found
        };
        match target {
            Some(position) => self.source.set_position(position).is_ok(),
            None => false,
        }
    }

    /// Measures one element: the distance from the cursor to the end of the
    /// element's last token. Trailing whitespace and comments are not
    /// included.
    ///
    /// # Errors
    ///
    /// Returns the first token-level error of the element.
    pub fn read_element_length(&mut self, is_root: bool) -> Result<usize> {
        let before = self.source.position();
        let mut last_end = before;
        let mut tokens = self.read_element(is_root);
        for item in &mut tokens {
            last_end = item?.end();
        }
        Ok(last_end - before)
    }
}
