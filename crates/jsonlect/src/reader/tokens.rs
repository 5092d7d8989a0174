//! The pull-based token stream.
//!
//! [`Tokens`] composes the sub-readers into objects and arrays with an
//! explicit frame stack, enforcing separator and trailing-comma rules and
//! finalizing open containers at end of input when the dialect permits it.
//! Tokens are produced one per `next` call; the first error ends the
//! stream.

use std::collections::VecDeque;

use crate::error::{ErrorKind, Result};
use crate::reader::Reader;
use crate::source::ScalarSource;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    /// Root object entered without `{`; closes at end of input and treats a
    /// stray `}` as an error.
    braceless: bool,
    /// Members or items completed so far.
    members: usize,
    /// Whether a comma has been consumed since the last member.
    comma: bool,
}

impl Frame {
    fn object(braceless: bool) -> Self {
        Self {
            kind: FrameKind::Object,
            braceless,
            members: 0,
            comma: false,
        }
    }

    fn array() -> Self {
        Self {
            kind: FrameKind::Array,
            braceless: false,
            members: 0,
            comma: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Braceless-root detection pending.
    Root,
    /// Expecting a value.
    Value,
    /// Expecting a property name or `}`.
    ObjectBody,
    /// Expecting an item or `]`.
    ArrayBody,
    /// A value inside a container just finished; handle the separator.
    AfterValue,
    Done,
}

/// Lazy sequence of [`Token`]s for one element.
///
/// Returned by [`Reader::read_element`]; borrows the reader, whose cursor
/// advances as tokens are pulled. After yielding an error the stream ends.
pub struct Tokens<'r, S> {
    reader: &'r mut Reader<S>,
    frames: Vec<Frame>,
    state: State,
    /// Comments read before a property name's colon; they are delivered
    /// right after the name token.
    queued: VecDeque<Token>,
    /// End of the last emitted token; anchors the zero-length closers of
    /// braceless and incomplete containers.
    last_end: usize,
    failed: bool,
}

impl<'r, S: ScalarSource> Tokens<'r, S> {
    pub(crate) fn new(reader: &'r mut Reader<S>, is_root: bool) -> Self {
        let state = if is_root && reader.options.omitted_root_object_braces {
            State::Root
        } else {
            State::Value
        };
        let last_end = reader.source.position();
        Self {
            reader,
            frames: Vec::new(),
            state,
            queued: VecDeque::new(),
            last_end,
            failed: false,
        }
    }

    fn after_value_state(&self) -> State {
        if self.frames.is_empty() {
            State::Done
        } else {
            State::AfterValue
        }
    }

    /// Emits the zero-length closer for the innermost open container.
    fn finalize_frame(&mut self) -> Option<Token> {
        let frame = self.frames.pop()?;
        let kind = match frame.kind {
            FrameKind::Object => TokenKind::EndObject,
            FrameKind::Array => TokenKind::EndArray,
        };
        self.state = self.after_value_state();
        Some(Token::bare(kind, self.last_end, 0))
    }

    #[allow(clippy::too_many_lines)]
    fn step(&mut self) -> Result<Option<Token>> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::Root => {
                    if self.reader.detect_braceless_root()? {
                        let position = self.reader.source.position();
                        self.frames.push(Frame::object(true));
                        self.state = State::ObjectBody;
                        return Ok(Some(Token::bare(TokenKind::StartObject, position, 0)));
                    }
                    self.state = State::Value;
                }
                State::Value => {
                    if let Some(comment) = self.reader.skim()? {
                        return Ok(Some(comment));
                    }
                    match self.reader.source.peek()? {
                        None => {
                            if self.reader.options.incomplete_inputs && !self.frames.is_empty() {
                                return Ok(self.finalize_frame());
                            }
                            return Err(self.reader.err_here(ErrorKind::UnexpectedEndOfInput));
                        }
                        Some('{') => {
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.push(Frame::object(false));
                            self.state = State::ObjectBody;
                            return Ok(Some(Token::bare(
                                TokenKind::StartObject,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some('[') => {
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.push(Frame::array());
                            self.state = State::ArrayBody;
                            return Ok(Some(Token::bare(
                                TokenKind::StartArray,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some(_) => {
                            let token = self.reader.read_primitive()?;
                            self.state = self.after_value_state();
                            return Ok(Some(token));
                        }
                    }
                }
                State::ObjectBody => {
                    if let Some(comment) = self.reader.skim()? {
                        return Ok(Some(comment));
                    }
                    let Some(&frame) = self.frames.last() else {
                        self.state = State::Done;
                        return Ok(None);
                    };
                    match self.reader.source.peek()? {
                        None => {
                            if frame.braceless || self.reader.options.incomplete_inputs {
                                return Ok(self.finalize_frame());
                            }
                            return Err(self.reader.err_here(ErrorKind::UnexpectedEndOfInput));
                        }
                        Some('}') => {
                            if frame.braceless {
                                return Err(self.reader.err_here(ErrorKind::Syntax(
                                    "unexpected '}' in a braceless object",
                                )));
                            }
                            if frame.comma
                                && frame.members > 0
                                && !self.reader.options.trailing_commas
                            {
                                return Err(self
                                    .reader
                                    .err_here(ErrorKind::Syntax("trailing commas are not allowed")));
                            }
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.pop();
                            self.state = self.after_value_state();
                            return Ok(Some(Token::bare(
                                TokenKind::EndObject,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some(_) => {
                            if frame.members > 0
                                && !frame.comma
                                && !self.reader.options.omitted_commas
                            {
                                return Err(self
                                    .reader
                                    .err_here(ErrorKind::Syntax("expected ',' or '}'")));
                            }
                            let (name, comments) = self.reader.read_property_name()?;
                            if let Some(frame) = self.frames.last_mut() {
                                frame.members += 1;
                                frame.comma = false;
                            }
                            self.queued.extend(comments);
                            self.state = State::Value;
                            return Ok(Some(name));
                        }
                    }
                }
                State::ArrayBody => {
                    if let Some(comment) = self.reader.skim()? {
                        return Ok(Some(comment));
                    }
                    let Some(&frame) = self.frames.last() else {
                        self.state = State::Done;
                        return Ok(None);
                    };
                    match self.reader.source.peek()? {
                        None => {
                            if self.reader.options.incomplete_inputs {
                                return Ok(self.finalize_frame());
                            }
                            return Err(self.reader.err_here(ErrorKind::UnexpectedEndOfInput));
                        }
                        Some(']') => {
                            if frame.comma
                                && frame.members > 0
                                && !self.reader.options.trailing_commas
                            {
                                return Err(self
                                    .reader
                                    .err_here(ErrorKind::Syntax("trailing commas are not allowed")));
                            }
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.pop();
                            self.state = self.after_value_state();
                            return Ok(Some(Token::bare(
                                TokenKind::EndArray,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some(_) => {
                            if frame.members > 0
                                && !frame.comma
                                && !self.reader.options.omitted_commas
                            {
                                return Err(self
                                    .reader
                                    .err_here(ErrorKind::Syntax("expected ',' or ']'")));
                            }
                            if let Some(frame) = self.frames.last_mut() {
                                frame.members += 1;
                                frame.comma = false;
                            }
                            self.state = State::Value;
                        }
                    }
                }
                State::AfterValue => {
                    if let Some(comment) = self.reader.skim()? {
                        return Ok(Some(comment));
                    }
                    let Some(&frame) = self.frames.last() else {
                        self.state = State::Done;
                        return Ok(None);
                    };
                    match self.reader.source.peek()? {
                        None => {
                            if frame.braceless || self.reader.options.incomplete_inputs {
                                return Ok(self.finalize_frame());
                            }
                            return Err(self.reader.err_here(ErrorKind::UnexpectedEndOfInput));
                        }
                        Some(',') => {
                            self.reader.source.read()?;
                            if let Some(frame) = self.frames.last_mut() {
                                frame.comma = true;
                            }
                            self.state = match frame.kind {
                                FrameKind::Object => State::ObjectBody,
                                FrameKind::Array => State::ArrayBody,
                            };
                        }
                        Some('}') if frame.kind == FrameKind::Object => {
                            if frame.braceless {
                                return Err(self.reader.err_here(ErrorKind::Syntax(
                                    "unexpected '}' in a braceless object",
                                )));
                            }
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.pop();
                            self.state = self.after_value_state();
                            return Ok(Some(Token::bare(
                                TokenKind::EndObject,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some(']') if frame.kind == FrameKind::Array => {
                            let position = self.reader.source.position();
                            self.reader.source.read()?;
                            self.frames.pop();
                            self.state = self.after_value_state();
                            return Ok(Some(Token::bare(
                                TokenKind::EndArray,
                                position,
                                self.reader.source.position() - position,
                            )));
                        }
                        Some(_) => {
                            self.state = match frame.kind {
                                FrameKind::Object => State::ObjectBody,
                                FrameKind::Array => State::ArrayBody,
                            };
                        }
                    }
                }
            }
        }
    }
}

impl<S: ScalarSource> Iterator for Tokens<'_, S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.queued.pop_front() {
            self.last_end = token.end();
            return Some(Ok(token));
        }
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(Some(token)) => {
                self.last_end = token.end();
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
