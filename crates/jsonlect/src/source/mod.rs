//! Seekable cursors over Unicode scalars.
//!
//! Every input surface is adapted to the [`ScalarSource`] trait: a cursor
//! with non-consuming `peek`, consuming `read`, conditional `try_read`, and
//! a storable/restorable `position`. Positions are opaque to the tokenizer;
//! their unit depends on the source (byte offsets for text, byte, and stream
//! sources; scalar indices for scalar lists).

mod bytes;
mod encoding;
mod stream;

pub use bytes::ByteScalars;
pub use encoding::Encoding;
pub use stream::StreamScalars;

use crate::error::{Error, ErrorKind, Result};

/// A seekable cursor over Unicode scalar values.
pub trait ScalarSource {
    /// Returns the next scalar without consuming it, or `None` at end of
    /// input.
    fn peek(&mut self) -> Result<Option<char>>;

    /// Consumes and returns the next scalar, or `None` at end of input.
    fn read(&mut self) -> Result<Option<char>>;

    /// Consumes the next scalar iff it equals `expected`; otherwise the
    /// position is unchanged.
    fn try_read(&mut self, expected: char) -> Result<bool> {
        if self.peek()? == Some(expected) {
            self.read()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes every remaining scalar and returns them as a string.
    fn read_to_end(&mut self) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = self.read()? {
            out.push(c);
        }
        Ok(out)
    }

    /// The current position. Comparable and restorable; otherwise opaque.
    fn position(&self) -> usize;

    /// Restores a position previously obtained from [`position`].
    ///
    /// [`position`]: ScalarSource::position
    fn set_position(&mut self, position: usize) -> Result<()>;

    /// Total length of the source, in position units.
    fn len(&mut self) -> Result<usize>;
}

/// A scalar cursor over a borrowed string slice.
///
/// Positions are UTF-8 byte offsets into the slice.
#[derive(Debug, Clone)]
pub struct TextScalars<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextScalars<'a> {
    /// Creates a cursor positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl ScalarSource for TextScalars<'_> {
    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.text[self.pos..].chars().next())
    }

    fn read(&mut self) -> Result<Option<char>> {
        match self.text[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    fn read_to_end(&mut self) -> Result<String> {
        let rest = self.text[self.pos..].to_string();
        self.pos = self.text.len();
        Ok(rest)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, position: usize) -> Result<()> {
        if position <= self.text.len() && self.text.is_char_boundary(position) {
            self.pos = position;
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::Syntax("position is not a scalar boundary"),
                position,
            ))
        }
    }

    fn len(&mut self) -> Result<usize> {
        Ok(self.text.len())
    }
}

/// A scalar cursor over a pre-decoded scalar slice.
///
/// Positions are scalar indices; every step advances by exactly one.
#[derive(Debug, Clone)]
pub struct CharScalars<'a> {
    scalars: &'a [char],
    pos: usize,
}

impl<'a> CharScalars<'a> {
    /// Creates a cursor positioned at the first scalar.
    #[must_use]
    pub fn new(scalars: &'a [char]) -> Self {
        Self { scalars, pos: 0 }
    }
}

impl ScalarSource for CharScalars<'_> {
    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.scalars.get(self.pos).copied())
    }

    fn read(&mut self) -> Result<Option<char>> {
        match self.scalars.get(self.pos).copied() {
            Some(c) => {
                self.pos += 1;
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    fn read_to_end(&mut self) -> Result<String> {
        let rest = self.scalars[self.pos..].iter().collect();
        self.pos = self.scalars.len();
        Ok(rest)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, position: usize) -> Result<()> {
        if position <= self.scalars.len() {
            self.pos = position;
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::Syntax("position is past the end of input"),
                position,
            ))
        }
    }

    fn len(&mut self) -> Result<usize> {
        Ok(self.scalars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cursor_steps_by_scalar() {
        let mut s = TextScalars::new("aé😀");
        assert_eq!(s.peek().unwrap(), Some('a'));
        assert_eq!(s.read().unwrap(), Some('a'));
        assert_eq!(s.position(), 1);
        assert_eq!(s.read().unwrap(), Some('é'));
        assert_eq!(s.position(), 3);
        assert!(s.try_read('😀').unwrap());
        assert_eq!(s.read().unwrap(), None);

        s.set_position(1).unwrap();
        assert_eq!(s.read_to_end().unwrap(), "é😀");
        assert!(s.set_position(2).is_err());
    }

    #[test]
    fn char_cursor_counts_scalars() {
        let scalars: Vec<char> = "a😀b".chars().collect();
        let mut s = CharScalars::new(&scalars);
        assert_eq!(s.len().unwrap(), 3);
        assert_eq!(s.read().unwrap(), Some('a'));
        assert_eq!(s.read().unwrap(), Some('😀'));
        assert_eq!(s.position(), 2);
        assert!(!s.try_read('c').unwrap());
        assert_eq!(s.position(), 2);
    }
}
