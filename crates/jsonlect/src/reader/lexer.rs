//! Sub-readers for one syntactic unit at a time.
//!
//! Each reader consumes scalars from the cursor and either produces a token
//! or fails with the position of the offending scalar. The two speculative
//! paths (a failed number or literal re-read as an unquoted string) restore the
//! cursor before re-reading, so a failed attempt leaks no consumed input.

use crate::error::{Error, ErrorKind, Result};
use crate::reader::Reader;
use crate::reader::escape_buffer::UnicodeEscapeBuffer;
use crate::reader::literal_buffer::{ExpectedLiteralBuffer, Step};
use crate::source::ScalarSource;
use crate::token::{Token, TokenKind};

/// The terminators that end lines, line comments, and unquoted strings.
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_inline_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_line_terminator(c)
}

/// The four whitespace scalars strict JSON permits.
fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Scalars that, after a complete number or keyword, confirm the token
/// rather than extending it into an unquoted string.
fn is_primitive_follower(c: char) -> bool {
    matches!(c, ',' | ':' | '{' | '}' | '[' | ']' | '"' | '\'')
}

fn is_identifier_scalar(c: char) -> bool {
    c.is_alphabetic() || c == '$' || c == '_'
}

impl<S: ScalarSource> Reader<S> {
    pub(crate) fn err_here(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.source.position())
    }

    // ------------------------------------------------------------------
    // Whitespace and comments
    // ------------------------------------------------------------------

    /// Consumes whitespace and at most one comment, returning the comment
    /// token when one was read. `Ok(None)` means the cursor now rests on a
    /// non-trivia scalar or end of input.
    pub(crate) fn skim(&mut self) -> Result<Option<Token>> {
        loop {
            let Some(c) = self.source.peek()? else {
                return Ok(None);
            };
            if is_json_whitespace(c) {
                self.source.read()?;
                continue;
            }
            if c.is_whitespace() {
                if self.options.all_whitespace {
                    self.source.read()?;
                    continue;
                }
                return Err(self.err_here(ErrorKind::UnexpectedCharacter(c)));
            }
            if c == '/' || c == '#' {
                return self.read_comment();
            }
            return Ok(None);
        }
    }

    /// Reads the comment starting at the cursor, or restores the cursor and
    /// returns `Ok(None)` when the scalar does not open an enabled comment.
    fn read_comment(&mut self) -> Result<Option<Token>> {
        let start = self.source.position();
        let Some(c) = self.source.read()? else {
            return Ok(None);
        };
        match c {
            '#' if self.options.hash_comments => {
                let body = self.read_comment_line()?;
                Ok(Some(self.comment_token(start, body)))
            }
            '/' => match self.source.peek()? {
                Some('/') if self.options.line_comments => {
                    self.source.read()?;
                    let body = self.read_comment_line()?;
                    Ok(Some(self.comment_token(start, body)))
                }
                Some('*') if self.options.block_comments => {
                    self.source.read()?;
                    let body = self.read_comment_block()?;
                    Ok(Some(self.comment_token(start, body)))
                }
                _ => {
                    self.source.set_position(start)?;
                    Ok(None)
                }
            },
            _ => {
                self.source.set_position(start)?;
                Ok(None)
            }
        }
    }

    fn comment_token(&self, start: usize, body: String) -> Token {
        Token::new(TokenKind::Comment, start, self.source.position() - start, body)
    }

    fn read_comment_line(&mut self) -> Result<String> {
        let mut body = String::new();
        while let Some(c) = self.source.peek()? {
            if is_line_terminator(c) {
                break;
            }
            self.source.read()?;
            body.push(c);
        }
        Ok(body)
    }

    fn read_comment_block(&mut self) -> Result<String> {
        let mut body = String::new();
        loop {
            let Some(c) = self.source.read()? else {
                if self.options.incomplete_inputs {
                    return Ok(body);
                }
                return Err(self.err_here(ErrorKind::Syntax("unterminated block comment")));
            };
            if c == '*' && self.source.try_read('/')? {
                return Ok(body);
            }
            body.push(c);
        }
    }

    // ------------------------------------------------------------------
    // Primitive dispatch
    // ------------------------------------------------------------------

    /// Reads one primitive token (literal, string, or number) at the
    /// cursor. The cursor must rest on a non-trivia scalar.
    pub(crate) fn read_primitive(&mut self) -> Result<Token> {
        let start = self.source.position();
        let Some(c) = self.source.peek()? else {
            return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
        };
        match c {
            'n' => self.read_literal(start, "null", TokenKind::Null),
            't' => self.read_literal(start, "true", TokenKind::True),
            'f' => self.read_literal(start, "false", TokenKind::False),
            '"' | '\'' => self.read_string(),
            '0'..='9' | '-' | '+' | '.' | 'I' | 'N' => self.read_number(start),
            _ if self.options.quoteless_strings => self.read_unquoted_string(start),
            _ => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
        }
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    /// Advances over `keyword`, returning `false` without further
    /// consumption on the first diverging scalar.
    fn read_keyword(&mut self, keyword: &'static str) -> Result<bool> {
        let mut matcher = ExpectedLiteralBuffer::new(keyword);
        loop {
            let Some(c) = self.source.peek()? else {
                return Ok(false);
            };
            match matcher.step(c) {
                Step::NeedMore => {
                    self.source.read()?;
                }
                Step::Done => {
                    self.source.read()?;
                    return Ok(true);
                }
                Step::Reject => return Ok(false),
            }
        }
    }

    fn read_literal(&mut self, start: usize, keyword: &'static str, kind: TokenKind) -> Result<Token> {
        if self.read_keyword(keyword)? {
            if self.options.quoteless_strings && !self.follow_accepts_primitive()? {
                self.source.set_position(start)?;
                return self.read_unquoted_string(start);
            }
            return Ok(Token::bare(kind, start, self.source.position() - start));
        }
        if self.options.quoteless_strings {
            self.source.set_position(start)?;
            return self.read_unquoted_string(start);
        }
        match self.source.peek()? {
            Some(c) => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
            None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
        }
    }

    /// `Infinity`/`NaN` are matched like literals but carried as string
    /// tokens holding the verbatim (possibly signed) lexeme.
    fn read_named_float(
        &mut self,
        start: usize,
        keyword: &'static str,
        mut lexeme: String,
    ) -> Result<Token> {
        if self.read_keyword(keyword)? {
            if self.options.quoteless_strings && !self.follow_accepts_primitive()? {
                self.source.set_position(start)?;
                return self.read_unquoted_string(start);
            }
            lexeme.push_str(keyword);
            return Ok(Token::new(
                TokenKind::String,
                start,
                self.source.position() - start,
                lexeme,
            ));
        }
        if self.options.quoteless_strings {
            self.source.set_position(start)?;
            return self.read_unquoted_string(start);
        }
        match self.source.peek()? {
            Some(c) => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
            None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
        }
    }

    /// After a complete number or keyword, decides between keeping it and
    /// re-reading from its start as an unquoted string: inline whitespace
    /// and comments are skipped speculatively, then a line terminator, end
    /// of input, or structural scalar confirms the token.
    fn follow_accepts_primitive(&mut self) -> Result<bool> {
        let save = self.source.position();
        let verdict = self.follow_scan();
        self.source.set_position(save)?;
        match verdict {
            Ok(accept) => Ok(accept),
            // Trivia that fails to scan (an unterminated block comment, a
            // decode error) resurfaces on the next non-speculative read.
            Err(_) => Ok(true),
        }
    }

    fn follow_scan(&mut self) -> Result<bool> {
        loop {
            let Some(c) = self.source.peek()? else {
                return Ok(true);
            };
            if is_line_terminator(c) {
                return Ok(true);
            }
            if c.is_whitespace() {
                self.source.read()?;
                continue;
            }
            if c == '/' || c == '#' {
                match self.read_comment()? {
                    Some(_) => continue,
                    None => return Ok(false),
                }
            }
            return Ok(is_primitive_follower(c));
        }
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    fn read_string(&mut self) -> Result<Token> {
        let start = self.source.position();
        let Some(quote) = self.source.read()? else {
            return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
        };
        if quote == '\'' {
            if !self.options.single_quoted_strings {
                return Err(Error::new(
                    ErrorKind::Syntax("single-quoted strings are not allowed"),
                    start,
                ));
            }
            if self.source.try_read('\'')? {
                if self.options.multi_quoted_strings && self.source.try_read('\'')? {
                    return self.read_triple_quoted(start, quote);
                }
                // Two quotes alone are the empty string.
                return Ok(Token::new(
                    TokenKind::String,
                    start,
                    self.source.position() - start,
                    String::new(),
                ));
            }
        }
        self.read_quoted_tail(start, quote)
    }

    fn read_quoted_tail(&mut self, start: usize, quote: char) -> Result<Token> {
        let mut value = String::new();
        loop {
            let Some(c) = self.source.read()? else {
                if self.options.incomplete_inputs {
                    break;
                }
                return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
            };
            if c == quote {
                break;
            }
            if c == '\\' {
                self.read_escape(&mut value)?;
                continue;
            }
            if matches!(c, '\n' | '\r') {
                return Err(self.err_here(ErrorKind::Syntax("unescaped line break in string")));
            }
            value.push(c);
        }
        Ok(Token::new(
            TokenKind::String,
            start,
            self.source.position() - start,
            value,
        ))
    }

    fn read_escape(&mut self, value: &mut String) -> Result<()> {
        let escape_pos = self.source.position();
        let Some(c) = self.source.read()? else {
            if self.options.incomplete_inputs {
                return Ok(());
            }
            return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
        };
        match c {
            '"' | '\\' | '/' => value.push(c),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\u{000B}'),
            '\'' => {
                if self.options.single_quoted_strings || self.options.invalid_string_escape_sequences
                {
                    value.push('\'');
                } else {
                    return Err(Error::new(ErrorKind::InvalidEscape('\''), escape_pos));
                }
            }
            'u' => value.push(self.read_unicode_escape()?),
            'x' => {
                if self.options.escaped_string_short_hex
                    || self.options.invalid_string_escape_sequences
                {
                    value.push(self.read_short_hex_escape()?);
                } else {
                    return Err(Error::new(ErrorKind::InvalidEscape('x'), escape_pos));
                }
            }
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                if self.options.escaped_string_newlines
                    || self.options.invalid_string_escape_sequences
                {
                    // A line continuation appends nothing.
                    if c == '\r' {
                        self.source.try_read('\n')?;
                    }
                } else {
                    return Err(Error::new(
                        ErrorKind::Syntax("escaped line breaks are not allowed"),
                        escape_pos,
                    ));
                }
            }
            other => {
                if self.options.invalid_string_escape_sequences {
                    value.push(other);
                } else {
                    return Err(Error::new(ErrorKind::InvalidEscape(other), escape_pos));
                }
            }
        }
        Ok(())
    }

    /// Decodes `HHHH` after `\u`, pairing a high surrogate with the
    /// immediately following `\uHHHH` low half.
    pub(crate) fn read_unicode_escape(&mut self) -> Result<char> {
        let unit = self.read_hex4()?;
        match unit {
            0xD800..=0xDBFF => {
                if !self.source.try_read('\\')? || !self.source.try_read('u')? {
                    return Err(self.err_here(ErrorKind::UnpairedSurrogate(unit)));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.err_here(ErrorKind::UnpairedSurrogate(unit)));
                }
                let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                Ok(char::from_u32(code).expect("paired surrogates form a scalar"))
            }
            0xDC00..=0xDFFF => Err(self.err_here(ErrorKind::UnpairedSurrogate(unit))),
            _ => Ok(char::from_u32(u32::from(unit)).expect("BMP scalar")),
        }
    }

    fn read_hex4(&mut self) -> Result<u16> {
        let mut buffer = UnicodeEscapeBuffer::new();
        loop {
            let Some(c) = self.source.read()? else {
                return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
            };
            match buffer.feed(c) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(kind) => return Err(self.err_here(kind)),
            }
        }
    }

    fn read_short_hex_escape(&mut self) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..2 {
            let Some(c) = self.source.read()? else {
                return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
            };
            let Some(digit) = c.to_digit(16) else {
                return Err(self.err_here(ErrorKind::InvalidUnicodeEscapeChar(c)));
            };
            code = (code << 4) | digit;
        }
        Ok(char::from_u32(code).expect("two hex digits are below U+0100"))
    }

    /// Everything up to the next line terminator, verbatim.
    pub(crate) fn read_unquoted_string(&mut self, start: usize) -> Result<Token> {
        let mut value = String::new();
        while let Some(c) = self.source.peek()? {
            if is_line_terminator(c) {
                break;
            }
            self.source.read()?;
            value.push(c);
        }
        Ok(Token::new(
            TokenKind::String,
            start,
            self.source.position() - start,
            value,
        ))
    }

    fn read_triple_quoted(&mut self, start: usize, quote: char) -> Result<Token> {
        let mut raw = String::new();
        loop {
            let Some(c) = self.source.read()? else {
                if self.options.incomplete_inputs {
                    break;
                }
                return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
            };
            if c == quote {
                if self.source.try_read(quote)? {
                    if self.source.try_read(quote)? {
                        break;
                    }
                    raw.push(quote);
                    raw.push(quote);
                } else {
                    raw.push(quote);
                }
                continue;
            }
            raw.push(c);
        }
        Ok(Token::new(
            TokenKind::String,
            start,
            self.source.position() - start,
            trim_multiline_indent(&raw),
        ))
    }

    // ------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------

    fn read_number(&mut self, start: usize) -> Result<Token> {
        match self.read_number_inner(start) {
            Ok(token) => {
                // Named floats run their own follow-check before returning.
                if token.kind == TokenKind::Number
                    && self.options.quoteless_strings
                    && !self.follow_accepts_primitive()?
                {
                    self.source.set_position(start)?;
                    return self.read_unquoted_string(start);
                }
                Ok(token)
            }
            Err(_) if self.options.quoteless_strings => {
                self.source.set_position(start)?;
                self.read_unquoted_string(start)
            }
            Err(e) => Err(e),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn read_number_inner(&mut self, start: usize) -> Result<Token> {
        let options = self.options;
        let mut lexeme = String::new();

        if self.source.try_read('-')? {
            lexeme.push('-');
        } else if self.source.peek()? == Some('+') {
            if !options.explicit_plus_signs {
                return Err(self.err_here(ErrorKind::Syntax("explicit plus signs are not allowed")));
            }
            self.source.read()?;
            lexeme.push('+');
        }

        match self.source.peek()? {
            Some('I') if options.named_floating_point_literals => {
                return self.read_named_float(start, "Infinity", lexeme);
            }
            Some('N') if options.named_floating_point_literals => {
                return self.read_named_float(start, "NaN", lexeme);
            }
            _ => {}
        }

        let mut int_digits = 0usize;
        if self.source.peek()? == Some('0') {
            self.source.read()?;
            lexeme.push('0');
            int_digits = 1;
            match self.source.peek()? {
                Some(x @ ('x' | 'X')) => {
                    if !options.hexadecimal_numbers {
                        return Err(
                            self.err_here(ErrorKind::Syntax("hexadecimal numbers are not allowed"))
                        );
                    }
                    self.source.read()?;
                    lexeme.push(x);
                    let mut hex_digits = 0usize;
                    while let Some(c) = self.source.peek()? {
                        if c.is_ascii_hexdigit() {
                            self.source.read()?;
                            lexeme.push(c);
                            hex_digits += 1;
                        } else {
                            break;
                        }
                    }
                    if hex_digits == 0 {
                        return Err(self.err_here(ErrorKind::Syntax("expected hexadecimal digits")));
                    }
                    return Ok(Token::new(
                        TokenKind::Number,
                        start,
                        self.source.position() - start,
                        lexeme,
                    ));
                }
                Some(c) if c.is_ascii_digit() && !options.leading_zeroes => {
                    return Err(self.err_here(ErrorKind::Syntax("leading zeroes are not allowed")));
                }
                _ => {}
            }
        }
        while let Some(c) = self.source.peek()? {
            if c.is_ascii_digit() {
                self.source.read()?;
                lexeme.push(c);
                int_digits += 1;
            } else {
                break;
            }
        }

        let mut frac_digits = 0usize;
        if self.source.peek()? == Some('.') {
            if int_digits == 0 && !options.leading_decimal_points {
                return Err(self.err_here(ErrorKind::Syntax("leading decimal points are not allowed")));
            }
            self.source.read()?;
            lexeme.push('.');
            while let Some(c) = self.source.peek()? {
                if c.is_ascii_digit() {
                    self.source.read()?;
                    lexeme.push(c);
                    frac_digits += 1;
                } else {
                    break;
                }
            }
            if frac_digits == 0 {
                if int_digits == 0 {
                    return Err(self.err_here(ErrorKind::Syntax("expected digits in number")));
                }
                if !options.trailing_decimal_points {
                    return Err(
                        self.err_here(ErrorKind::Syntax("trailing decimal points are not allowed"))
                    );
                }
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return match self.source.peek()? {
                Some(c) => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
                None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
            };
        }

        let mut has_exponent = false;
        if let Some(e @ ('e' | 'E')) = self.source.peek()? {
            has_exponent = true;
            self.source.read()?;
            lexeme.push(e);
            if let Some(sign @ ('-' | '+')) = self.source.peek()? {
                self.source.read()?;
                lexeme.push(sign);
            }
            let mut exp_digits = 0usize;
            while let Some(c) = self.source.peek()? {
                if c.is_ascii_digit() {
                    self.source.read()?;
                    lexeme.push(c);
                    exp_digits += 1;
                } else {
                    break;
                }
            }
            if exp_digits == 0 {
                return Err(self.err_here(ErrorKind::Syntax("expected exponent digits")));
            }
        }

        match self.source.peek()? {
            Some('.') => Err(self.err_here(ErrorKind::Syntax(if has_exponent {
                "exponents cannot be fractional"
            } else {
                "duplicate decimal point"
            }))),
            Some('e' | 'E') => Err(self.err_here(ErrorKind::Syntax("duplicate exponent"))),
            Some('a'..='d' | 'f' | 'A'..='D' | 'F') => {
                Err(self.err_here(ErrorKind::Syntax("hexadecimal digit in a decimal number")))
            }
            _ => Ok(Token::new(
                TokenKind::Number,
                start,
                self.source.position() - start,
                lexeme,
            )),
        }
    }

    // ------------------------------------------------------------------
    // Property names
    // ------------------------------------------------------------------

    /// Reads a property name and its terminating `:`, returning the name
    /// token plus any comments seen between name and colon (their positions
    /// follow the name's, so emitting them afterwards keeps token order).
    pub(crate) fn read_property_name(&mut self) -> Result<(Token, Vec<Token>)> {
        match self.source.peek()? {
            Some('"' | '\'') => {
                let string = self.read_string()?;
                let name = Token::new(
                    TokenKind::PropertyName,
                    string.position,
                    string.length,
                    string.value,
                );
                let comments = self.expect_colon()?;
                Ok((name, comments))
            }
            _ if self.options.ecma_property_names => self.read_ecma_property_name(),
            _ if self.options.quoteless_property_names => self.read_quoteless_property_name(),
            Some(c) => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
            None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn expect_colon(&mut self) -> Result<Vec<Token>> {
        let mut comments = Vec::new();
        while let Some(comment) = self.skim()? {
            comments.push(comment);
        }
        if self.source.try_read(':')? {
            return Ok(comments);
        }
        match self.source.peek()? {
            Some(_) => Err(self.err_here(ErrorKind::Syntax("expected ':' after property name"))),
            None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn read_ecma_property_name(&mut self) -> Result<(Token, Vec<Token>)> {
        let start = self.source.position();
        let mut name = String::new();
        loop {
            match self.source.peek()? {
                Some(c) if is_identifier_scalar(c) => {
                    self.source.read()?;
                    name.push(c);
                }
                Some('\\') => {
                    self.source.read()?;
                    if !self.source.try_read('u')? {
                        return Err(self.err_here(ErrorKind::Syntax(
                            "expected a unicode escape in property name",
                        )));
                    }
                    name.push(self.read_unicode_escape()?);
                }
                _ => break,
            }
        }
        if name.is_empty() {
            return match self.source.peek()? {
                Some(c) => Err(self.err_here(ErrorKind::UnexpectedCharacter(c))),
                None => Err(self.err_here(ErrorKind::UnexpectedEndOfInput)),
            };
        }
        let token = Token::new(
            TokenKind::PropertyName,
            start,
            self.source.position() - start,
            name,
        );
        let comments = self.expect_colon()?;
        Ok((token, comments))
    }

    /// Hjson bareword names: verbatim scalars up to the `:`, which is
    /// consumed. Whitespace and structural scalars cannot appear.
    fn read_quoteless_property_name(&mut self) -> Result<(Token, Vec<Token>)> {
        let start = self.source.position();
        let mut name = String::new();
        loop {
            let Some(c) = self.source.peek()? else {
                return Err(self.err_here(ErrorKind::UnexpectedEndOfInput));
            };
            if c == ':' {
                break;
            }
            if matches!(c, ',' | '[' | ']' | '{' | '}') {
                return Err(self.err_here(ErrorKind::UnexpectedCharacter(c)));
            }
            if c.is_whitespace() {
                return Err(self.err_here(ErrorKind::Syntax(
                    "whitespace is not allowed in an unquoted property name",
                )));
            }
            self.source.read()?;
            name.push(c);
        }
        if name.is_empty() {
            return Err(self.err_here(ErrorKind::UnexpectedCharacter(':')));
        }
        let token = Token::new(
            TokenKind::PropertyName,
            start,
            self.source.position() - start,
            name,
        );
        self.source.read()?; // the ':'
        Ok((token, Vec::new()))
    }

    // ------------------------------------------------------------------
    // Braceless root detection
    // ------------------------------------------------------------------

    /// Speculatively checks whether the document starts with a property
    /// name and colon, which marks a root object with omitted braces. The
    /// cursor is always restored; a lexical failure just means "no".
    pub(crate) fn detect_braceless_root(&mut self) -> Result<bool> {
        let save = self.source.position();
        let probe = (|| -> Result<()> {
            while self.skim()?.is_some() {}
            self.read_property_name()?;
            Ok(())
        })();
        self.source.set_position(save)?;
        Ok(probe.is_ok())
    }
}

/// Indent trimming for `'''` strings, anchored on the closing delimiter:
/// the whitespace run before the closing quotes sets the width that is
/// stripped from the head of every line, the closing line itself (when
/// blank) and one leading line break are dropped.
fn trim_multiline_indent(raw: &str) -> String {
    let Some(last_term) = raw.rfind(is_line_terminator) else {
        return raw.to_string();
    };
    let term_char = raw[last_term..].chars().next().expect("index is at a terminator");
    let closing = &raw[last_term + term_char.len_utf8()..];

    let (body, indent) = if closing.chars().all(is_inline_whitespace) {
        let mut body_end = last_term;
        if term_char == '\n' && raw[..last_term].ends_with('\r') {
            body_end -= 1;
        }
        (&raw[..body_end], closing.chars().count())
    } else {
        let trailing = closing
            .chars()
            .rev()
            .take_while(|c| is_inline_whitespace(*c))
            .count();
        (raw, trailing)
    };

    let mut out = String::with_capacity(body.len());
    let mut skip = indent;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if is_line_terminator(c) {
            out.push(c);
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
                out.push('\n');
            }
            skip = indent;
            continue;
        }
        if skip > 0 && is_inline_whitespace(c) {
            skip -= 1;
            continue;
        }
        skip = 0;
        out.push(c);
    }

    if out.starts_with("\r\n") {
        out.drain(..2);
    } else if out.starts_with(is_line_terminator) {
        out.remove(0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::trim_multiline_indent;

    #[test]
    fn single_line_is_verbatim() {
        assert_eq!(trim_multiline_indent("qwerty"), "qwerty");
        assert_eq!(trim_multiline_indent("  qwerty  "), "  qwerty  ");
    }

    #[test]
    fn closing_line_indent_is_stripped_from_every_line() {
        assert_eq!(trim_multiline_indent("\nqwerty\n"), "qwerty");
        assert_eq!(trim_multiline_indent("\n   qwerty\n   "), "qwerty");
        assert_eq!(trim_multiline_indent("\n  qwerty\n "), " qwerty");
        assert_eq!(
            trim_multiline_indent("\n   first\n     second\n   "),
            "first\n  second"
        );
    }

    #[test]
    fn content_on_the_closing_line_keeps_the_tail() {
        assert_eq!(trim_multiline_indent("\n  qwerty"), "  qwerty");
    }

    #[test]
    fn crlf_terminators_survive() {
        assert_eq!(trim_multiline_indent("\r\n  a\r\n  b\r\n  "), "a\r\nb");
    }
}
