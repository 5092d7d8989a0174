/// One syntactic unit together with its exact source span.
///
/// `position` and `length` bound a span that, re-read under the same
/// options, yields an equal token. Their unit is that of the underlying
/// source (byte offsets for text, byte, and stream sources; scalar indices
/// for scalar-list sources).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Which syntactic unit this is.
    pub kind: TokenKind,
    /// Starting source position.
    pub position: usize,
    /// Distance from `position` to just past the token. Zero for the
    /// synthetic delimiters of a braceless or incomplete container.
    pub length: usize,
    /// Decoded payload for strings, property names, numbers (verbatim
    /// lexeme), and comments (body without delimiters); empty otherwise.
    pub value: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, position: usize, length: usize, value: String) -> Self {
        Self {
            kind,
            position,
            length,
            value,
        }
    }

    pub(crate) fn bare(kind: TokenKind, position: usize, length: usize) -> Self {
        Self::new(kind, position, length, String::new())
    }

    /// Source position just past this token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The literal `null`.
    Null,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// A quoted, triple-quoted, or unquoted string; also carries named
    /// floating-point lexemes (`Infinity`, `NaN`).
    String,
    /// A number, carried as its verbatim lexical form.
    Number,
    /// `{`, or the zero-length opener of a braceless root object.
    StartObject,
    /// `}`, or the zero-length closer of a braceless or incomplete object.
    EndObject,
    /// `[`.
    StartArray,
    /// `]`, or the zero-length closer of an incomplete array.
    EndArray,
    /// A property name; the span covers the name only, not its `:`.
    PropertyName,
    /// A comment; the payload excludes the comment delimiters.
    Comment,
}

impl TokenKind {
    /// Returns `true` for tokens that open or close an object or array.
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::StartObject | Self::EndObject | Self::StartArray | Self::EndArray
        )
    }

    /// Returns `true` for tokens that are a complete value by themselves.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Null | Self::True | Self::False | Self::String | Self::Number
        )
    }
}
