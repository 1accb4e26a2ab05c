/*
 * output.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Capture of what a code part prints.
//!
//! An [`OutputBuffer`] is a cloneable handle, so an evaluator may keep one
//! (for example to back a `print` builtin registered once at setup). Writes
//! are only kept while a code part is being evaluated; anything printed at
//! other times (imports, setup) is discarded.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Capture {
    bytes: Vec<u8>,
    accepting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    capture: Arc<Mutex<Capture>>,
}

impl OutputBuffer {
    /// A buffer that discards writes until a capture begins.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Capture> {
        self.capture.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether writes are currently kept.
    pub fn is_capturing(&self) -> bool {
        self.lock().accepting
    }

    /// Bytes captured so far.
    pub fn len(&self) -> usize {
        self.lock().bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().bytes.is_empty()
    }

    /// Copy of the bytes captured so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().bytes.clone()
    }

    /// Start keeping writes, dropping anything left from before.
    pub(crate) fn begin(&self) {
        let mut capture = self.lock();
        capture.bytes.clear();
        capture.accepting = true;
    }

    /// Stop keeping writes and hand back what was captured.
    pub(crate) fn finish(&self) -> Vec<u8> {
        let mut capture = self.lock();
        capture.accepting = false;
        std::mem::take(&mut capture.bytes)
    }
}

impl io::Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut capture = self.lock();
        if capture.accepting {
            capture.bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
