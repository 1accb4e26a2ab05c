/*
 * iterator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Iteration over template parts.
//!
//! All iterators share the [`PartIterator`] contract:
//!
//! - [`advance`](PartIterator::advance) steps to the next part and reports
//!   whether one is available
//! - [`value`](PartIterator::value) is the current part, `None` before the
//!   first `advance` and after exhaustion
//! - [`error`](PartIterator::error) is the terminal error, if any
//!
//! Exhaustion is permanent: once `advance` returns `false` it keeps returning
//! `false` and `value` stays `None`.

use crate::delimiters::Delimiters;
use crate::error::{CodeBufferError, Result};
use crate::part::Part;
use crate::rune::RuneRead;
use crate::scanner::Scanner;
use crate::sequence::PartSequence;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub trait PartIterator {
    /// Step to the next part. Returns `true` if [`value`](Self::value) now holds one.
    fn advance(&mut self) -> bool;

    /// The current part.
    fn value(&self) -> Option<&Arc<Part>>;

    /// The error that ended iteration, if it did not end at end of stream.
    fn error(&self) -> Option<&CodeBufferError>;

    /// Adapt into a standard [`Iterator`] yielding each part, then the
    /// terminal error (if any) once.
    fn into_parts(self) -> Parts<Self>
    where
        Self: Sized,
    {
        Parts {
            inner: self,
            done: false,
        }
    }
}

impl<I: PartIterator + ?Sized> PartIterator for Box<I> {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn value(&self) -> Option<&Arc<Part>> {
        (**self).value()
    }

    fn error(&self) -> Option<&CodeBufferError> {
        (**self).error()
    }
}

/// [`Iterator`] adapter returned by [`PartIterator::into_parts`].
#[derive(Debug)]
pub struct Parts<I> {
    inner: I,
    done: bool,
}

impl<I: PartIterator> Iterator for Parts<I> {
    type Item = Result<Arc<Part>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.inner.advance() {
            if let Some(part) = self.inner.value() {
                return Some(Ok(Arc::clone(part)));
            }
        }
        self.done = true;
        self.inner.error().cloned().map(Err)
    }
}

/// Replays a fixed, already-known sequence of parts. Never fails.
#[derive(Debug, Clone, Default)]
pub struct CacheIterator {
    parts: Vec<Arc<Part>>,
    position: usize,
    exhausted: bool,
}

impl CacheIterator {
    pub fn new(parts: impl Into<Vec<Arc<Part>>>) -> Self {
        Self {
            parts: parts.into(),
            position: 0,
            exhausted: false,
        }
    }

    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        Self::new(parts.into_iter().map(Arc::new).collect::<Vec<_>>())
    }

    /// Parts not yet returned.
    pub fn remaining(&self) -> usize {
        if self.exhausted {
            0
        } else {
            self.parts.len() - self.position
        }
    }
}

impl PartIterator for CacheIterator {
    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if self.position < self.parts.len() {
            self.position += 1;
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    fn value(&self) -> Option<&Arc<Part>> {
        if self.exhausted {
            return None;
        }
        self.position
            .checked_sub(1)
            .and_then(|index| self.parts.get(index))
    }

    fn error(&self) -> Option<&CodeBufferError> {
        None
    }
}

/// Scans a reader on demand, committing every part it finds to a shared
/// [`PartSequence`] and bumping a shared progress counter.
///
/// The part is appended before the counter is incremented, so a reader that
/// observes a count of `n` can always read `n` parts from the sequence.
pub struct LiveIterator<R> {
    scanner: Scanner<R>,
    parts: PartSequence,
    progress: Arc<AtomicUsize>,
    current: Option<Arc<Part>>,
    error: Option<CodeBufferError>,
    done: bool,
}

impl<R: RuneRead> LiveIterator<R> {
    /// Bind a scanner over `reader` to `parts` and `progress`.
    ///
    /// Nothing is read until the first [`advance`](PartIterator::advance).
    ///
    /// # Errors
    ///
    /// Returns [`CodeBufferError::InvalidDelimiters`] if the delimiters
    /// cannot be scanned.
    pub fn new(
        progress: Arc<AtomicUsize>,
        parts: PartSequence,
        reader: R,
        delimiters: &Delimiters,
    ) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(reader, delimiters)?,
            parts,
            progress,
            current: None,
            error: None,
            done: false,
        })
    }

    /// True once the stream is exhausted or failed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn parts(&self) -> &PartSequence {
        &self.parts
    }

    fn stop(&mut self) {
        self.done = true;
        self.current = None;
    }
}

impl<R: RuneRead> PartIterator for LiveIterator<R> {
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.scanner.next_part() {
            Ok(Some(part)) => {
                let part = Arc::new(part);
                let index = self.parts.push(Arc::clone(&part));
                self.progress.fetch_add(1, Ordering::Release);
                tracing::trace!(
                    index,
                    part_type = %part.part_type(),
                    len = part.len(),
                    "Committed part"
                );
                self.current = Some(part);
                true
            }
            Ok(None) => {
                tracing::debug!(
                    parts = self.parts.len(),
                    bytes = self.scanner.offset(),
                    "Scan complete"
                );
                self.stop();
                false
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    bytes = self.scanner.offset(),
                    "Scan failed"
                );
                self.error = Some(err.into());
                self.stop();
                false
            }
        }
    }

    fn value(&self) -> Option<&Arc<Part>> {
        self.current.as_ref()
    }

    fn error(&self) -> Option<&CodeBufferError> {
        self.error.as_ref()
    }
}
