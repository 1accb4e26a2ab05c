/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for parsing and executing templates.

use crate::evaluator::EvalError;
use thiserror::Error;
use weave_codebuffer::CodeBufferError;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// `exec` was called before any source was attached.
    #[error("template was never parsed")]
    NotParsed,

    /// The template source could not be read or the delimiters are invalid.
    #[error("Scan error: {0}")]
    Scan(#[from] CodeBufferError),

    /// The evaluator rejected a code part or an import.
    #[error("Evaluation error: {0}")]
    Evaluation(#[source] EvalError),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
