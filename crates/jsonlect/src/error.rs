use thiserror::Error;

use crate::source::Encoding;

/// Alias for `Result` with this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An error produced while reading, with the source position at which it was
/// discovered.
///
/// Positions use the unit of the underlying source (byte offsets for text,
/// byte, and stream sources; scalar indices for scalar-list sources).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Source position at which the error was discovered.
    pub position: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The kinds of failure a [`Reader`](crate::Reader) can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A scalar that cannot start or continue the construct being read.
    #[error("invalid character '{0}'")]
    UnexpectedCharacter(char),
    /// The input ended inside a construct that requires more scalars.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A backslash escape that is not part of the active escape table.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// A non-hexadecimal digit inside a `\uHHHH` or `\xHH` escape.
    #[error("invalid unicode escape character '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A `\u` escape that decodes to half of a surrogate pair.
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u16),
    /// A fixed-message syntax error.
    #[error("{0}")]
    Syntax(&'static str),
    /// A byte sequence that is not valid for the effective encoding.
    #[error("malformed {0} byte sequence")]
    MalformedEncoding(Encoding),
    /// A byte above 0x7F in ASCII input.
    #[error("byte 0x{0:02X} is not valid ASCII")]
    NonAsciiByte(u8),
    /// A failure reported by the underlying byte stream.
    #[error("i/o error: {0}")]
    Io(String),
    /// A failure while projecting the parsed tree into a user type.
    #[cfg(any(test, feature = "serde"))]
    #[error("{0}")]
    Projection(String),
}
