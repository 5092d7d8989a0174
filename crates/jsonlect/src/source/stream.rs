use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, ErrorKind, Result};
use crate::source::encoding::{DecodeFailure, Encoding, decode_scalar};
use crate::source::ScalarSource;

const CHUNK: usize = 4096;
// Consumed window bytes are dropped once they pass this mark; restoring an
// older position falls back to a seek.
const TRIM_THRESHOLD: usize = 4 * CHUNK;

/// A scalar cursor over a seekable byte stream.
///
/// Bytes are pulled in chunks into a window that the decoder consumes from;
/// positions are absolute byte offsets and restoring one outside the window
/// re-seeks the underlying stream. When no encoding is declared the stream
/// preamble is inspected for a byte order mark.
#[derive(Debug)]
pub struct StreamScalars<R> {
    inner: R,
    encoding: Encoding,
    window: Vec<u8>,
    /// Absolute offset of `window[0]`. The inner stream cursor always sits
    /// at `window_start + window.len()`.
    window_start: usize,
    at_eof: bool,
    pos: usize,
    total_len: Option<usize>,
}

impl<R: Read + Seek> StreamScalars<R> {
    /// Creates a cursor over `inner`, detecting the encoding from the BOM
    /// when none is declared.
    ///
    /// # Errors
    ///
    /// Fails if the stream cannot be read or its preamble cannot be seeked.
    pub fn new(mut inner: R, encoding: Option<Encoding>) -> Result<Self> {
        let origin = position_of(&mut inner)?;
        let mut preamble = [0u8; 4];
        let mut filled = 0;
        while filled < preamble.len() {
            let n = inner
                .read(&mut preamble[filled..])
                .map_err(|e| Error::new(ErrorKind::Io(e.to_string()), origin))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        let (encoding, bom_len) = match encoding {
            Some(declared) => {
                let bom = declared.bom();
                let skip = if !bom.is_empty() && preamble[..filled].starts_with(bom) {
                    bom.len()
                } else {
                    0
                };
                (declared, skip)
            }
            None => Encoding::detect(&preamble[..filled]),
        };
        Ok(Self {
            inner,
            encoding,
            window: preamble[..filled].to_vec(),
            window_start: origin,
            at_eof: filled < 4,
            pos: origin + bom_len,
            total_len: None,
        })
    }

    /// The encoding this cursor decodes with.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Releases the cursor and returns the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn io_err(&self, e: &std::io::Error) -> Error {
        Error::new(ErrorKind::Io(e.to_string()), self.pos)
    }

    fn window_end(&self) -> usize {
        self.window_start + self.window.len()
    }

    /// Makes the window cover at least four bytes past the cursor, or up to
    /// end of input, re-seeking first when the cursor left the window.
    fn fill(&mut self) -> Result<()> {
        if self.pos < self.window_start || self.pos > self.window_end() {
            self.inner
                .seek(SeekFrom::Start(self.pos as u64))
                .map_err(|e| self.io_err(&e))?;
            self.window.clear();
            self.window_start = self.pos;
            self.at_eof = false;
        }
        while !self.at_eof && self.window_end() - self.pos < 4 {
            let mut buf = [0u8; CHUNK];
            let n = self.inner.read(&mut buf).map_err(|e| self.io_err(&e))?;
            if n == 0 {
                self.at_eof = true;
            } else {
                self.window.extend_from_slice(&buf[..n]);
            }
        }
        let consumed = self.pos - self.window_start;
        if consumed > TRIM_THRESHOLD {
            self.window.drain(..consumed);
            self.window_start = self.pos;
        }
        Ok(())
    }

    fn decode_here(&mut self) -> Result<Option<(char, usize)>> {
        self.fill()?;
        let slice = &self.window[self.pos - self.window_start..];
        decode_scalar(self.encoding, slice).map_err(|failure| {
            let kind = match failure {
                // `fill` stops short of four bytes only at end of input.
                DecodeFailure::Incomplete | DecodeFailure::Malformed => {
                    ErrorKind::MalformedEncoding(self.encoding)
                }
                DecodeFailure::NonAscii(b) => ErrorKind::NonAsciiByte(b),
            };
            Error::new(kind, self.pos)
        })
    }
}

fn position_of<R: Seek>(inner: &mut R) -> Result<usize> {
    let at = inner
        .stream_position()
        .map_err(|e| Error::new(ErrorKind::Io(e.to_string()), 0))?;
    usize::try_from(at).map_err(|_| Error::new(ErrorKind::Syntax("source is too large"), 0))
}

impl<R: Read + Seek> ScalarSource for StreamScalars<R> {
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
        self.pos = position;
        Ok(())
    }

    fn len(&mut self) -> Result<usize> {
        if let Some(len) = self.total_len {
            return Ok(len);
        }
        let resume = self.window_end() as u64;
        let end = self
            .inner
            .seek(SeekFrom::End(0))
            .map_err(|e| self.io_err(&e))?;
        self.inner
            .seek(SeekFrom::Start(resume))
            .map_err(|e| self.io_err(&e))?;
        let len = usize::try_from(end)
            .map_err(|_| Error::new(ErrorKind::Syntax("source is too large"), self.pos))?;
        self.total_len = Some(len);
        Ok(len)
    }
}
