use crate::error::{Error, ErrorKind, Result};
use crate::source::encoding::{DecodeFailure, Encoding, decode_scalar};
use crate::source::ScalarSource;

/// A scalar cursor over a borrowed byte buffer with a declared or detected
/// encoding.
///
/// Positions are byte offsets into the buffer. When no encoding is declared
/// the preamble is inspected for a byte order mark; a BOM matching the
/// effective encoding is skipped either way.
#[derive(Debug, Clone)]
pub struct ByteScalars<'a> {
    bytes: &'a [u8],
    encoding: Encoding,
    pos: usize,
}

impl<'a> ByteScalars<'a> {
    /// Creates a cursor over `bytes`, detecting the encoding from the BOM
    /// when none is declared.
    #[must_use]
    pub fn new(bytes: &'a [u8], encoding: Option<Encoding>) -> Self {
        let (encoding, bom_len) = match encoding {
            Some(declared) => {
                let bom = declared.bom();
                let skip = if !bom.is_empty() && bytes.starts_with(bom) {
                    bom.len()
                } else {
                    0
                };
                (declared, skip)
            }
            None => Encoding::detect(bytes),
        };
        Self {
            bytes,
            encoding,
            pos: bom_len,
        }
    }

    /// The encoding this cursor decodes with.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn decode_here(&self) -> Result<Option<(char, usize)>> {
        decode_scalar(self.encoding, &self.bytes[self.pos.min(self.bytes.len())..]).map_err(
            |failure| {
                let kind = match failure {
                    // The buffer is complete, so a truncated sequence is
                    // malformed rather than pending.
                    DecodeFailure::Incomplete | DecodeFailure::Malformed => {
                        ErrorKind::MalformedEncoding(self.encoding)
                    }
                    DecodeFailure::NonAscii(b) => ErrorKind::NonAsciiByte(b),
                };
                Error::new(kind, self.pos)
            },
        )
    }
}

impl ScalarSource for ByteScalars<'_> {
    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.decode_here()?.map(|(c, _)| c))
    }

    fn read(&mut self) -> Result<Option<char>> {
        match self.decode_here()? {
            Some((c, width)) => {
                self.pos += width;
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, position: usize) -> Result<()> {
        if position <= self.bytes.len() {
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
        Ok(self.bytes.len())
    }
}
