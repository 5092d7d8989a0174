#![allow(clippy::struct_excessive_bools)]

/// Configuration options for a [`Reader`](crate::Reader).
///
/// Every field toggles one grammar extension independently, so dialects can
/// be mixed and matched freely. The presets ([`Options::json`],
/// [`Options::jsonc`], [`Options::json5`], [`Options::hjson`]) set the
/// documented subsets.
///
/// # Examples
///
/// ```rust
/// use jsonlect::{Options, Reader};
///
/// let options = Options {
///     line_comments: true,
///     trailing_commas: true,
///     ..Options::default()
/// };
/// let mut reader = Reader::from_str("[1, 2,] // done", options);
/// assert!(reader.parse_element(true).is_ok());
/// ```
///
/// # Default
///
/// All options default to `false`, which is strict JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Whether to allow `// line` comments.
    ///
    /// # Default
    ///
    /// `false`
    pub line_comments: bool,

    /// Whether to allow `/* block */` comments. Block comments do not nest.
    ///
    /// # Default
    ///
    /// `false`
    pub block_comments: bool,

    /// Whether to allow `# hash` comments.
    ///
    /// # Default
    ///
    /// `false`
    pub hash_comments: bool,

    /// Whether to allow a single trailing comma before a closing `}` or `]`.
    ///
    /// # Default
    ///
    /// `false`
    pub trailing_commas: bool,

    /// Whether commas between members and items may be omitted entirely.
    ///
    /// # Default
    ///
    /// `false`
    pub omitted_commas: bool,

    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default only the four whitespace characters defined by the JSON
    /// specification are recognized: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009). Any other
    /// Unicode whitespace scalar is an error.
    ///
    /// # Default
    ///
    /// `false`
    pub all_whitespace: bool,

    /// Whether property names may be bare words read verbatim up to the
    /// terminating `:` (Hjson style).
    ///
    /// # Default
    ///
    /// `false`
    pub quoteless_property_names: bool,

    /// Whether property names may be ECMAScript-style identifiers (Unicode
    /// letters, `$`, `_`, and `\uHHHH` escapes).
    ///
    /// # Default
    ///
    /// `false`
    pub ecma_property_names: bool,

    /// Whether strings may be delimited with single quotes.
    ///
    /// # Default
    ///
    /// `false`
    pub single_quoted_strings: bool,

    /// Whether `'''`-delimited multi-line strings are recognized.
    /// Only meaningful together with [`single_quoted_strings`].
    ///
    /// [`single_quoted_strings`]: Options::single_quoted_strings
    ///
    /// # Default
    ///
    /// `false`
    pub multi_quoted_strings: bool,

    /// Whether values may be unquoted strings running to the end of the
    /// line (Hjson style).
    ///
    /// # Default
    ///
    /// `false`
    pub quoteless_strings: bool,

    /// Whether a backslash followed by a line terminator is a line
    /// continuation inside quoted strings.
    ///
    /// # Default
    ///
    /// `false`
    pub escaped_string_newlines: bool,

    /// Whether the two-digit `\xHH` escape is recognized inside quoted
    /// strings.
    ///
    /// # Default
    ///
    /// `false`
    pub escaped_string_short_hex: bool,

    /// Whether unknown escape sequences append the escaped character
    /// literally instead of failing. Also enables `\'`, `\xHH`, and escaped
    /// line terminators.
    ///
    /// # Default
    ///
    /// `false`
    pub invalid_string_escape_sequences: bool,

    /// Whether integer parts may carry superfluous leading zeroes.
    ///
    /// # Default
    ///
    /// `false`
    pub leading_zeroes: bool,

    /// Whether a number may start with a decimal point (`.5`).
    ///
    /// # Default
    ///
    /// `false`
    pub leading_decimal_points: bool,

    /// Whether a number may end with a decimal point (`5.`).
    ///
    /// # Default
    ///
    /// `false`
    pub trailing_decimal_points: bool,

    /// Whether a number may carry an explicit leading `+`.
    ///
    /// # Default
    ///
    /// `false`
    pub explicit_plus_signs: bool,

    /// Whether `Infinity` and `NaN` (optionally signed) are recognized in
    /// number position. The verbatim lexeme is carried in a string token.
    ///
    /// # Default
    ///
    /// `false`
    pub named_floating_point_literals: bool,

    /// Whether `0x`/`0X` hexadecimal integers are recognized.
    ///
    /// # Default
    ///
    /// `false`
    pub hexadecimal_numbers: bool,

    /// Whether a root document may be an object without `{` and `}`.
    ///
    /// # Default
    ///
    /// `false`
    pub omitted_root_object_braces: bool,

    /// Whether end-of-input inside a string, comment, object, or array
    /// finalizes the construct cleanly instead of failing.
    ///
    /// # Default
    ///
    /// `false`
    pub incomplete_inputs: bool,
}

impl Options {
    /// Strict JSON: every extension disabled.
    #[must_use]
    pub fn json() -> Self {
        Self::default()
    }

    /// JSON with comments: line and block comments plus trailing commas.
    #[must_use]
    pub fn jsonc() -> Self {
        Self {
            line_comments: true,
            block_comments: true,
            trailing_commas: true,
            ..Self::default()
        }
    }

    /// The JSON5 grammar.
    #[must_use]
    pub fn json5() -> Self {
        Self {
            ecma_property_names: true,
            trailing_commas: true,
            single_quoted_strings: true,
            escaped_string_newlines: true,
            escaped_string_short_hex: true,
            invalid_string_escape_sequences: true,
            hexadecimal_numbers: true,
            leading_decimal_points: true,
            trailing_decimal_points: true,
            named_floating_point_literals: true,
            explicit_plus_signs: true,
            line_comments: true,
            block_comments: true,
            all_whitespace: true,
            ..Self::default()
        }
    }

    /// The Hjson grammar.
    #[must_use]
    pub fn hjson() -> Self {
        Self {
            quoteless_property_names: true,
            trailing_commas: true,
            omitted_commas: true,
            single_quoted_strings: true,
            multi_quoted_strings: true,
            quoteless_strings: true,
            escaped_string_newlines: true,
            line_comments: true,
            block_comments: true,
            hash_comments: true,
            omitted_root_object_braces: true,
            ..Self::default()
        }
    }
}
