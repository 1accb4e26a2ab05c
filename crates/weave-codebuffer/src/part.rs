/*
 * part.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The unit of decomposition: a typed segment of a template.

use std::fmt;

/// Kind of a template segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartType {
    /// Literal text, written to the output as-is.
    Text,
    /// Embedded code, handed to an evaluator.
    Code,
}

impl PartType {
    /// The other kind. Scanning alternates between the two.
    pub fn toggle(self) -> Self {
        match self {
            PartType::Text => PartType::Code,
            PartType::Code => PartType::Text,
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartType::Text => write!(f, "text"),
            PartType::Code => write!(f, "code"),
        }
    }
}

/// One contiguous, typed segment of a decomposed template.
///
/// Parts are immutable once created. Delimiter tokens are never part of the
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    part_type: PartType,
    content: String,
}

impl Part {
    /// Create a part of the given type.
    pub fn new(part_type: PartType, content: impl Into<String>) -> Self {
        Self {
            part_type,
            content: content.into(),
        }
    }

    /// Create a text part.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(PartType::Text, content)
    }

    /// Create a code part.
    pub fn code(content: impl Into<String>) -> Self {
        Self::new(PartType::Code, content)
    }

    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    pub fn is_text(&self) -> bool {
        self.part_type == PartType::Text
    }

    pub fn is_code(&self) -> bool {
        self.part_type == PartType::Code
    }

    /// The content as raw bytes.
    pub fn content(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// The content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl fmt::Display for Part {
    /// Renders as `text("...")` / `code("...")`, mostly for test output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.part_type, self.content)
    }
}
