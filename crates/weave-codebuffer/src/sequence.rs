/*
 * sequence.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The shared, append-only list of discovered parts.
//!
//! Exactly one [`LiveIterator`](crate::LiveIterator) appends to a sequence;
//! everything else only reads the prefix committed so far. Cloning a
//! `PartSequence` clones the handle, not the parts.

use crate::iterator::CacheIterator;
use crate::part::Part;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

#[derive(Debug, Clone, Default)]
pub struct PartSequence {
    parts: Arc<RwLock<Vec<Arc<Part>>>>,
}

impl PartSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished part, returning its index.
    pub(crate) fn push(&self, part: Arc<Part>) -> usize {
        let mut parts = self.parts.write().unwrap_or_else(PoisonError::into_inner);
        parts.push(part);
        parts.len() - 1
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Part>>> {
        // Parts are never mutated in place, so a poisoned lock still guards valid data.
        self.parts.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Arc<Part>> {
        self.read().get(index).cloned()
    }

    /// The parts committed so far.
    pub fn snapshot(&self) -> Vec<Arc<Part>> {
        self.read().clone()
    }

    /// Replay the parts committed so far. Parts appended later are not seen.
    pub fn cache_iterator(&self) -> CacheIterator {
        CacheIterator::new(self.snapshot())
    }
}

impl FromIterator<Part> for PartSequence {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self {
            parts: Arc::new(RwLock::new(iter.into_iter().map(Arc::new).collect())),
        }
    }
}
