//! A pull-based tokenizer and tree builder for the JSON dialect family:
//! strict JSON, JSON-with-comments, JSON5, and Hjson.
//!
//! A [`Reader`] wraps any input surface (a string, a pre-decoded scalar
//! slice, a byte buffer, or a seekable byte stream with BOM-based encoding
//! detection) and reads it one token at a time under a set of [`Options`]
//! that toggles every non-JSON grammar feature independently.
//!
//! ```
//! use jsonlect::{Options, Reader};
//!
//! let document = "# an Hjson document\ntitle: no quotes needed\ncount: 3\n";
//! let mut reader = Reader::from_str(document, Options::hjson());
//! let value = reader.parse_element(true).unwrap();
//! assert_eq!(value.get("title").and_then(|v| v.as_str()), Some("no quotes needed"));
//! ```
//!
//! Besides [`parse_element`](Reader::parse_element) (tree mode) a reader
//! offers [`read_element`](Reader::read_element), a lazy stream of
//! [`Token`]s with exact source spans, and the navigation primitives
//! [`find_property`](Reader::find_property),
//! [`find_index`](Reader::find_index), and
//! [`read_element_length`](Reader::read_element_length) that locate content
//! without materializing it.

#[cfg(any(test, feature = "serde"))]
mod de;
mod error;
mod options;
mod reader;
mod source;
mod token;
mod tree;
mod value;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind, Result};
pub use options::Options;
pub use reader::{Reader, Tokens};
pub use source::{ByteScalars, CharScalars, Encoding, ScalarSource, StreamScalars, TextScalars};
pub use token::{Token, TokenKind};
pub use value::{Array, Map, Number, Value};
