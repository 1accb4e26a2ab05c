/*
 * delimiters.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Delimiter configuration.

use crate::error::{CodeBufferError, Result};
use serde::{Deserialize, Serialize};

/// Default start token.
pub const DEFAULT_START: &str = "<$";

/// Default end token.
pub const DEFAULT_END: &str = "$>";

/// Default trim marker.
pub const DEFAULT_TRIM_MARKER: char = '-';

/// Which characters a trim marker strips from the neighboring text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimSet {
    /// Any Unicode whitespace, including newlines and tabs.
    #[default]
    Whitespace,
    /// Spaces and tabs only; line breaks are kept.
    Spaces,
}

impl TrimSet {
    pub fn contains(self, c: char) -> bool {
        match self {
            TrimSet::Whitespace => c.is_whitespace(),
            TrimSet::Spaces => c == ' ' || c == '\t',
        }
    }

    pub fn trim_start(self, s: &mut String) {
        let start = s.len() - s.trim_start_matches(|c| self.contains(c)).len();
        s.drain(..start);
    }

    pub fn trim_end(self, s: &mut String) {
        let end = s.trim_end_matches(|c| self.contains(c)).len();
        s.truncate(end);
    }
}

/// Start/end tokens and trim behavior for a template.
///
/// An empty token disables the corresponding boundary:
/// - empty `start`: the document begins inside a code region
/// - empty `end`: a code region runs to the end of the document
///
/// With both empty the whole document is one code part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Delimiters {
    /// Token that opens a code region.
    pub start: String,

    /// Token that closes a code region.
    pub end: String,

    /// Character that, placed right after `start` or right before `end`,
    /// strips whitespace from the adjacent text. `None` disables trimming.
    pub trim_marker: Option<char>,

    /// Characters removed by the trim marker.
    pub trim: TrimSet,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            trim_marker: Some(DEFAULT_TRIM_MARKER),
            trim: TrimSet::default(),
        }
    }
}

impl Delimiters {
    /// Custom tokens with the default trim behavior.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    pub fn with_trim_marker(mut self, marker: Option<char>) -> Self {
        self.trim_marker = marker;
        self
    }

    pub fn with_trim(mut self, trim: TrimSet) -> Self {
        self.trim = trim;
        self
    }

    pub fn start_token(&self) -> Vec<char> {
        self.start.chars().collect()
    }

    pub fn end_token(&self) -> Vec<char> {
        self.end.chars().collect()
    }

    /// Check that the configuration can be scanned.
    ///
    /// Empty tokens are valid. A whitespace trim marker is not, since it
    /// would be indistinguishable from the whitespace it strips.
    pub fn validate(&self) -> Result<()> {
        if let Some(marker) = self.trim_marker {
            if marker.is_whitespace() {
                return Err(CodeBufferError::InvalidDelimiters {
                    message: format!("trim marker {:?} is whitespace", marker),
                });
            }
        }
        Ok(())
    }
}
