/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Streaming text/code segmentation for embedded-code templates.
//!
//! A template is a document in which code regions are embedded between a
//! start and an end token (`<$` and `$>` by default):
//!
//! ```text
//! Hello <$ print(context.Name) $>!
//! ```
//!
//! This crate splits such a document into an ordered sequence of [`Part`]s,
//! each either [`PartType::Text`] (passed through verbatim) or
//! [`PartType::Code`] (handed to an evaluator by the caller).
//!
//! # Architecture
//!
//! - [`RuneRead`] / [`Utf8Reader`] - character-level input
//! - [`matcher::TokenMatcher`] - partial-match state for a single token
//! - [`scanner::Scanner`] - the boundary-detection state machine
//! - [`LiveIterator`] - drives a scanner and commits parts to a shared [`PartSequence`]
//! - [`CacheIterator`] - replays parts that were already committed
//! - [`CodeBuffer`] - owns all of the above and picks the right iterator
//!
//! Both iterators implement [`PartIterator`], so callers do not care whether
//! the parts come from the stream or from the cache.
//!
//! # Example
//!
//! ```rust
//! use weave_codebuffer::{CodeBuffer, Delimiters, PartIterator, PartType, Utf8Reader};
//!
//! let mut buffer = CodeBuffer::new(
//!     Utf8Reader::from_string("Hello <$ name $>!"),
//!     Delimiters::default(),
//! )
//! .unwrap();
//!
//! let mut it = buffer.iterator().unwrap();
//! assert!(it.advance());
//! assert_eq!(it.value().unwrap().part_type(), PartType::Text);
//! assert_eq!(it.value().unwrap().as_str(), "Hello ");
//! ```

pub mod buffer;
pub mod delimiters;
pub mod error;
pub mod iterator;
pub mod matcher;
pub mod part;
pub mod rune;
pub mod scanner;
pub mod sequence;

// Re-export main types at crate root
pub use buffer::{BufferIterator, CodeBuffer};
pub use delimiters::{Delimiters, TrimSet};
pub use error::{CodeBufferError, Result};
pub use iterator::{CacheIterator, LiveIterator, PartIterator, Parts};
pub use part::{Part, PartType};
pub use rune::{RuneRead, Utf8Reader};
pub use sequence::PartSequence;
