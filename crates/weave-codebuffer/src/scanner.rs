/*
 * scanner.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The boundary-detection state machine.
//!
//! A [`Scanner`] alternates between scanning text (looking for the start
//! token) and scanning code (looking for the end token). Each completed token
//! finalizes the content accumulated so far as a [`Part`] of the current kind.
//!
//! On top of the token matching it applies a few rules at the moment a part is
//! finalized:
//!
//! - A token immediately followed by the same token shifted by one character
//!   (`{{{` with `{{`) binds to the rightmost position; the skipped character
//!   is content.
//! - A start token immediately followed by the trim marker strips trailing
//!   whitespace from the text before it. An end token immediately preceded by
//!   the trim marker strips leading whitespace from the text after it.
//! - Empty parts are dropped.
//!
//! At end of stream whatever has been accumulated, including a dangling
//! partial token, becomes the last part.

use crate::delimiters::{Delimiters, TrimSet};
use crate::error::Result;
use crate::matcher::{Step, TokenMatcher};
use crate::part::{Part, PartType};
use crate::rune::RuneRead;
use std::io;

pub struct Scanner<R> {
    reader: R,
    start: TokenMatcher,
    end: TokenMatcher,
    trim_marker: Option<char>,
    trim: TrimSet,

    mode: PartType,
    content: String,
    /// One character read past a token while looking for a trim marker.
    lookahead: Option<char>,
    /// The next text part loses its leading whitespace.
    trim_next_text: bool,
    /// Read failure hit while looking past a token; reported after the part
    /// that token completed.
    pending_error: Option<io::Error>,

    /// Bytes read so far.
    offset: usize,
    eof: bool,
    finished: bool,
}

impl<R: RuneRead> Scanner<R> {
    pub fn new(reader: R, delimiters: &Delimiters) -> Result<Self> {
        delimiters.validate()?;
        let start = TokenMatcher::new(delimiters.start_token());
        // Without a start token there is nothing to wait for.
        let mode = if start.is_disabled() {
            PartType::Code
        } else {
            PartType::Text
        };
        Ok(Self {
            reader,
            start,
            end: TokenMatcher::new(delimiters.end_token()),
            trim_marker: delimiters.trim_marker,
            trim: delimiters.trim,
            mode,
            content: String::new(),
            lookahead: None,
            trim_next_text: false,
            pending_error: None,
            offset: 0,
            eof: false,
            finished: false,
        })
    }

    /// Kind of the part currently being accumulated.
    pub fn mode(&self) -> PartType {
        self.mode
    }

    /// Bytes consumed from the reader.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True once the stream is exhausted or failed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scan forward until the next part is complete.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. After an error the
    /// scanner is finished and produces nothing more.
    pub fn next_part(&mut self) -> io::Result<Option<Part>> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        while !self.finished {
            let Some(c) = self.read()? else {
                return Ok(self.finish());
            };
            if let Some(part) = self.consume(c)? {
                return Ok(Some(part));
            }
        }
        Ok(None)
    }

    fn read(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.lookahead.take() {
            return Ok(Some(c));
        }
        if self.eof {
            return Ok(None);
        }
        match self.reader.read_rune() {
            Ok(Some((c, width))) => {
                self.offset += width;
                Ok(Some(c))
            }
            Ok(None) => {
                self.eof = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    fn matcher(&self, mode: PartType) -> &TokenMatcher {
        match mode {
            PartType::Text => &self.start,
            PartType::Code => &self.end,
        }
    }

    fn consume(&mut self, c: char) -> io::Result<Option<Part>> {
        let matcher = match self.mode {
            PartType::Text => &mut self.start,
            PartType::Code => &mut self.end,
        };
        match matcher.feed(c, &mut self.content) {
            Step::Consumed => Ok(None),
            Step::Boundary => self.boundary(),
        }
    }

    /// A token just completed: settle its position, then finalize the part.
    fn boundary(&mut self) -> io::Result<Option<Part>> {
        let mode = self.mode;
        let mut trim_before = false;

        loop {
            let next = match self.read() {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(err) => {
                    // The part is complete; the error waits for the next call.
                    self.pending_error = Some(err);
                    break;
                }
            };
            let matcher = self.matcher(mode);
            if matcher.realigns_with(next) {
                let skipped = matcher.token()[0];
                self.content.push(skipped);
                continue;
            }
            if mode == PartType::Text && self.trim_marker == Some(next) {
                trim_before = true;
            } else {
                self.lookahead = Some(next);
            }
            break;
        }

        let mut content = std::mem::take(&mut self.content);
        match mode {
            PartType::Text => {
                if trim_before {
                    self.trim.trim_end(&mut content);
                }
                if std::mem::take(&mut self.trim_next_text) {
                    self.trim.trim_start(&mut content);
                }
            }
            PartType::Code => {
                if let Some(marker) = self.trim_marker {
                    if content.ends_with(marker) {
                        content.pop();
                        self.trim_next_text = true;
                    }
                }
            }
        }

        self.mode = mode.toggle();
        match self.emit(mode, content) {
            Some(part) => Ok(Some(part)),
            None => match self.pending_error.take() {
                Some(err) => Err(err),
                None => Ok(None),
            },
        }
    }

    /// End of stream: flush everything as a part of the current kind.
    fn finish(&mut self) -> Option<Part> {
        self.finished = true;
        let mode = self.mode;
        match mode {
            PartType::Text => self.start.flush(&mut self.content),
            PartType::Code => self.end.flush(&mut self.content),
        }
        let mut content = std::mem::take(&mut self.content);
        if mode == PartType::Text && std::mem::take(&mut self.trim_next_text) {
            self.trim.trim_start(&mut content);
        }
        self.emit(mode, content)
    }

    fn emit(&self, part_type: PartType, content: String) -> Option<Part> {
        if content.is_empty() {
            tracing::trace!(%part_type, offset = self.offset, "Dropping empty part");
            return None;
        }
        Some(Part::new(part_type, content))
    }
}
