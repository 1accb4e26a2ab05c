/*
 * rune.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Character-level input for the scanner.
//!
//! The scanner consumes one character at a time through [`RuneRead`], so it
//! never needs the whole template in memory and never reads further than the
//! part it is currently producing (plus one character of lookahead).

use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, BufRead, Cursor};

/// A source of characters.
pub trait RuneRead {
    /// Read the next character and its encoded width in bytes.
    ///
    /// Returns `Ok(None)` at end of stream. Once end of stream has been
    /// reported the scanner does not call this method again.
    fn read_rune(&mut self) -> io::Result<Option<(char, usize)>>;
}

impl<R: RuneRead + ?Sized> RuneRead for &mut R {
    fn read_rune(&mut self) -> io::Result<Option<(char, usize)>> {
        (**self).read_rune()
    }
}

impl<R: RuneRead + ?Sized> RuneRead for Box<R> {
    fn read_rune(&mut self) -> io::Result<Option<(char, usize)>> {
        (**self).read_rune()
    }
}

/// Incremental UTF-8 decoder over any [`BufRead`].
///
/// Malformed input never fails: an invalid or truncated sequence decodes to
/// U+FFFD and its reported width is the number of bytes consumed for it.
#[derive(Debug)]
pub struct Utf8Reader<R> {
    inner: R,
}

impl<R: BufRead> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl Utf8Reader<Cursor<Vec<u8>>> {
    /// Reader over an owned string.
    pub fn from_string(source: impl Into<String>) -> Self {
        Self::from_bytes(source.into().into_bytes())
    }

    /// Reader over owned bytes.
    pub fn from_bytes(source: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(source.into()))
    }
}

impl<R: BufRead> RuneRead for Utf8Reader<R> {
    fn read_rune(&mut self) -> io::Result<Option<(char, usize)>> {
        let Some(lead) = self.peek_byte()? else {
            return Ok(None);
        };
        self.inner.consume(1);

        let width = sequence_width(lead);
        if width == 1 {
            return Ok(Some((char::from(lead), 1)));
        }
        if width == 0 {
            return Ok(Some((REPLACEMENT_CHARACTER, 1)));
        }

        let mut bytes = [lead, 0, 0, 0];
        let mut consumed = 1;
        while consumed < width {
            match self.peek_byte()? {
                Some(b) if is_continuation(b) => {
                    bytes[consumed] = b;
                    consumed += 1;
                    self.inner.consume(1);
                }
                // Truncated sequence: the byte that broke it belongs to the next rune.
                _ => return Ok(Some((REPLACEMENT_CHARACTER, consumed))),
            }
        }

        let rune = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(REPLACEMENT_CHARACTER);
        Ok(Some((rune, width)))
    }
}

/// Encoded length announced by a lead byte, 0 if it cannot start a sequence.
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
