/// What happened after feeding one more scalar into the keyword matcher?
pub(crate) enum Step {
    /// Scalar matched, but the keyword is not finished yet.
    NeedMore,
    /// Scalar matched *and* completed the keyword.
    Done,
    /// Scalar did **not** match the expected one.
    Reject,
}

/// Progressive matcher for a fixed keyword (`null`, `true`, `false`,
/// `Infinity`, `NaN`).
///
/// The caller feeds one scalar at a time and decides what a `Reject` means:
/// a hard error under strict options, or a cue to restore the cursor and
/// fall back to an unquoted string.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExpectedLiteralBuffer(&'static [u8]);

impl ExpectedLiteralBuffer {
    /// Starts matching the whole keyword, first scalar included.
    pub fn new(keyword: &'static str) -> Self {
        Self(keyword.as_bytes())
    }

    /// Gives the matcher the next input scalar and learns what to do next.
    pub fn step(&mut self, c: char) -> Step {
        match self.0.split_first() {
            Some((&expected, rest)) if expected as char == c => {
                self.0 = rest;
                if rest.is_empty() { Step::Done } else { Step::NeedMore }
            }
            _ => Step::Reject,
        }
    }
}
