/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for scanning.
//!
//! End of stream is not an error: iterators report it by returning `false`
//! from [`PartIterator::advance`](crate::PartIterator::advance) with no error set.

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building or driving a scanner.
#[derive(Debug, Clone, Error)]
pub enum CodeBufferError {
    /// The underlying reader failed with something other than end of stream.
    ///
    /// The io error is shared so that a buffer which failed once can report
    /// the same error to every later caller.
    #[error("{0}")]
    Read(#[source] Arc<io::Error>),

    /// The delimiter configuration cannot be scanned.
    #[error("Invalid delimiters: {message}")]
    InvalidDelimiters { message: String },
}

impl CodeBufferError {
    /// Access the io error behind a read failure.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CodeBufferError::Read(err) => Some(err),
            CodeBufferError::InvalidDelimiters { .. } => None,
        }
    }
}

impl From<io::Error> for CodeBufferError {
    fn from(err: io::Error) -> Self {
        CodeBufferError::Read(Arc::new(err))
    }
}

/// Result type for scanning operations.
pub type Result<T> = std::result::Result<T, CodeBufferError>;
