use core::fmt;

/// A text encoding accepted by the byte- and stream-backed sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 (the default when no encoding is declared and no BOM matches).
    Utf8,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-32, little-endian.
    Utf32Le,
    /// UTF-32, big-endian.
    Utf32Be,
    /// 7-bit ASCII; any byte above 0x7F fails.
    Ascii,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Ascii => "ASCII",
        })
    }
}

impl Encoding {
    /// Inspects a source preamble and selects an encoding from its byte
    /// order mark, defaulting to UTF-8 when none matches.
    ///
    /// Returns the encoding and the BOM length to skip. Longest marks are
    /// tried first so the UTF-32 marks are not mistaken for UTF-16 ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlect::Encoding;
    ///
    /// assert_eq!(Encoding::detect(&[0xEF, 0xBB, 0xBF, b'{']), (Encoding::Utf8, 3));
    /// assert_eq!(Encoding::detect(b"{}"), (Encoding::Utf8, 0));
    /// ```
    #[must_use]
    pub fn detect(preamble: &[u8]) -> (Self, usize) {
        if preamble.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
            (Self::Utf32Be, 4)
        } else if preamble.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
            (Self::Utf32Le, 4)
        } else if preamble.starts_with(&[0xEF, 0xBB, 0xBF]) {
            (Self::Utf8, 3)
        } else if preamble.starts_with(&[0xFE, 0xFF]) {
            (Self::Utf16Be, 2)
        } else if preamble.starts_with(&[0xFF, 0xFE]) {
            (Self::Utf16Le, 2)
        } else {
            (Self::Utf8, 0)
        }
    }

    /// The byte order mark for this encoding, empty for ASCII.
    pub(crate) fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Self::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            Self::Ascii => &[],
        }
    }

}

/// Why a scalar could not be decoded from a byte window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodeFailure {
    /// The window ends inside a multi-byte sequence. A streaming caller may
    /// retry with more bytes; at end of input this is a malformed sequence.
    Incomplete,
    /// The bytes cannot encode a Unicode scalar value in this encoding.
    Malformed,
    /// ASCII input contained a byte above 0x7F.
    NonAscii(u8),
}

/// Decodes the scalar at the start of `bytes`, returning it together with
/// its encoded width. `Ok(None)` means the window is empty.
pub(crate) fn decode_scalar(
    encoding: Encoding,
    bytes: &[u8],
) -> Result<Option<(char, usize)>, DecodeFailure> {
    if bytes.is_empty() {
        return Ok(None);
    }
    match encoding {
        Encoding::Utf8 => decode_utf8(bytes),
        Encoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
        Encoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
        Encoding::Ascii => {
            let b = bytes[0];
            if b <= 0x7F {
                Ok(Some((b as char, 1)))
            } else {
                Err(DecodeFailure::NonAscii(b))
            }
        }
    }
}

// First-byte dispatch: the lead byte alone determines the sequence width
// and the valid range of the second byte.
fn decode_utf8(bytes: &[u8]) -> Result<Option<(char, usize)>, DecodeFailure> {
    let b0 = bytes[0];
    let width = match b0 {
        0x00..=0x7F => return Ok(Some((b0 as char, 1))),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        // 0x80..=0xC1 are continuation or overlong lead bytes, 0xF5+ would
        // encode past U+10FFFF.
        _ => return Err(DecodeFailure::Malformed),
    };
    if bytes.len() < width {
        // Only incomplete if everything present so far is plausible.
        for (i, &b) in bytes.iter().enumerate().skip(1) {
            if !utf8_continuation_in_range(b0, i, b) {
                return Err(DecodeFailure::Malformed);
            }
        }
        return Err(DecodeFailure::Incomplete);
    }
    let mut code = u32::from(b0 & (0x7F >> width));
    for (i, &b) in bytes[1..width].iter().enumerate() {
        if !utf8_continuation_in_range(b0, i + 1, b) {
            return Err(DecodeFailure::Malformed);
        }
        code = (code << 6) | u32::from(b & 0x3F);
    }
    match char::from_u32(code) {
        Some(c) => Ok(Some((c, width))),
        None => Err(DecodeFailure::Malformed),
    }
}

fn utf8_continuation_in_range(b0: u8, index: usize, b: u8) -> bool {
    // The second byte carries the overlong/surrogate/range restrictions.
    if index == 1 {
        let range = match b0 {
            0xE0 => 0xA0..=0xBF,
            0xED => 0x80..=0x9F,
            0xF0 => 0x90..=0xBF,
            0xF4 => 0x80..=0x8F,
            _ => 0x80..=0xBF,
        };
        range.contains(&b)
    } else {
        (0x80..=0xBF).contains(&b)
    }
}

fn decode_utf16(
    bytes: &[u8],
    from_bytes: fn([u8; 2]) -> u16,
) -> Result<Option<(char, usize)>, DecodeFailure> {
    if bytes.len() < 2 {
        return Err(DecodeFailure::Incomplete);
    }
    let unit = from_bytes([bytes[0], bytes[1]]);
    match unit {
        0xD800..=0xDBFF => {
            if bytes.len() < 4 {
                return Err(DecodeFailure::Incomplete);
            }
            let low = from_bytes([bytes[2], bytes[3]]);
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(DecodeFailure::Malformed);
            }
            let code =
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            match char::from_u32(code) {
                Some(c) => Ok(Some((c, 4))),
                None => Err(DecodeFailure::Malformed),
            }
        }
        // A low surrogate cannot lead.
        0xDC00..=0xDFFF => Err(DecodeFailure::Malformed),
        _ => Ok(Some((char::from_u32(u32::from(unit)).expect("BMP scalar"), 2))),
    }
}

fn decode_utf32(
    bytes: &[u8],
    from_bytes: fn([u8; 4]) -> u32,
) -> Result<Option<(char, usize)>, DecodeFailure> {
    if bytes.len() < 4 {
        return Err(DecodeFailure::Incomplete);
    }
    let code = from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    match char::from_u32(code) {
        Some(c) => Ok(Some((c, 4))),
        None => Err(DecodeFailure::Malformed),
    }
}
