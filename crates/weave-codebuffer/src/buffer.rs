/*
 * buffer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Owner of a template's parts and of the scan that produces them.
//!
//! A [`CodeBuffer`] reads its source at most once. The first iteration drives
//! the scan; every part found is kept, so later iterations replay the parts
//! without touching the reader. If an iteration stops early, the next one
//! replays what was already found and then continues scanning where the
//! previous one left off.

use crate::delimiters::Delimiters;
use crate::error::{CodeBufferError, Result};
use crate::iterator::{CacheIterator, LiveIterator, PartIterator};
use crate::part::Part;
use crate::rune::RuneRead;
use crate::sequence::PartSequence;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type BoxedReader = Box<dyn RuneRead + Send>;

enum ScanState {
    Scanning(LiveIterator<BoxedReader>),
    Complete,
    Failed(CodeBufferError),
}

impl ScanState {
    /// Leave `Scanning` once the live iterator has stopped.
    fn settle(&mut self) {
        if let ScanState::Scanning(live) = self {
            if !live.is_done() {
                return;
            }
            let next = match live.error() {
                Some(err) => ScanState::Failed(err.clone()),
                None => ScanState::Complete,
            };
            *self = next;
        }
    }
}

pub struct CodeBuffer {
    parts: PartSequence,
    progress: Arc<AtomicUsize>,
    state: ScanState,
}

impl CodeBuffer {
    /// Attach a buffer to `reader`. Nothing is read yet.
    ///
    /// # Errors
    ///
    /// Returns [`CodeBufferError::InvalidDelimiters`] if the delimiters
    /// cannot be scanned.
    pub fn new(reader: impl RuneRead + Send + 'static, delimiters: Delimiters) -> Result<Self> {
        let parts = PartSequence::new();
        let progress = Arc::new(AtomicUsize::new(0));
        let reader: BoxedReader = Box::new(reader);
        let live = LiveIterator::new(Arc::clone(&progress), parts.clone(), reader, &delimiters)?;
        Ok(Self {
            parts,
            progress,
            state: ScanState::Scanning(live),
        })
    }

    /// Iterate over all parts of the template.
    ///
    /// Parts already found are replayed from the cache; the rest are scanned
    /// on demand.
    ///
    /// # Errors
    ///
    /// Returns the read error of an earlier scan that failed.
    pub fn iterator(&mut self) -> Result<BufferIterator<'_>> {
        if let ScanState::Failed(err) = &self.state {
            return Err(err.clone());
        }
        let replay = self.parts.cache_iterator();
        let inner = if self.is_complete() {
            Inner::Cached(replay)
        } else {
            Inner::Resuming {
                replay,
                state: &mut self.state,
                current: None,
                error: None,
                done: false,
            }
        };
        Ok(BufferIterator { inner })
    }

    /// Scan the rest of the source. Returns the total number of parts.
    ///
    /// # Errors
    ///
    /// Returns the read error if scanning fails (now or earlier).
    pub fn parse_all(&mut self) -> Result<usize> {
        if let ScanState::Scanning(live) = &mut self.state {
            while live.advance() {}
        }
        self.state.settle();
        match &self.state {
            ScanState::Failed(err) => Err(err.clone()),
            _ => Ok(self.parts.len()),
        }
    }

    /// True once the whole source has been scanned successfully.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, ScanState::Complete)
    }

    /// The error that stopped scanning, if any.
    pub fn error(&self) -> Option<&CodeBufferError> {
        match &self.state {
            ScanState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Number of parts committed so far.
    pub fn committed(&self) -> usize {
        self.progress.load(Ordering::Acquire)
    }

    /// Shared handle to the committed-parts counter.
    pub fn progress(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.progress)
    }

    pub fn parts(&self) -> &PartSequence {
        &self.parts
    }
}

impl fmt::Debug for CodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            ScanState::Scanning(_) => "scanning",
            ScanState::Complete => "complete",
            ScanState::Failed(_) => "failed",
        };
        f.debug_struct("CodeBuffer")
            .field("state", &state)
            .field("committed", &self.committed())
            .finish()
    }
}

/// Iterator returned by [`CodeBuffer::iterator`].
pub struct BufferIterator<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Cached(CacheIterator),
    Resuming {
        replay: CacheIterator,
        state: &'a mut ScanState,
        current: Option<Arc<Part>>,
        error: Option<CodeBufferError>,
        done: bool,
    },
}

impl PartIterator for BufferIterator<'_> {
    fn advance(&mut self) -> bool {
        match &mut self.inner {
            Inner::Cached(it) => it.advance(),
            Inner::Resuming {
                replay,
                state,
                current,
                error,
                done,
            } => {
                if *done {
                    return false;
                }
                if replay.advance() {
                    *current = replay.value().cloned();
                    return true;
                }
                if let ScanState::Scanning(live) = &mut **state {
                    if live.advance() {
                        *current = live.value().cloned();
                        return true;
                    }
                }
                state.settle();
                if let ScanState::Failed(err) = &**state {
                    *error = Some(err.clone());
                }
                *current = None;
                *done = true;
                false
            }
        }
    }

    fn value(&self) -> Option<&Arc<Part>> {
        match &self.inner {
            Inner::Cached(it) => it.value(),
            Inner::Resuming { current, .. } => current.as_ref(),
        }
    }

    fn error(&self) -> Option<&CodeBufferError> {
        match &self.inner {
            Inner::Cached(_) => None,
            Inner::Resuming { error, .. } => error.as_ref(),
        }
    }
}
