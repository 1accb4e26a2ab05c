/*
 * matcher.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Partial-match state for a single delimiter token.
//!
//! The matcher is fed one character at a time. Characters that cannot be part
//! of the token are written to the caller's content buffer; characters that
//! might still be are held back until the token either completes or fails.
//! The held-back characters are always a prefix of the token, so the matcher
//! only needs to remember how long that prefix is.

/// Outcome of feeding one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The character went to the content buffer or extended a partial match.
    Consumed,
    /// The character completed the token.
    Boundary,
}

#[derive(Debug, Clone)]
pub struct TokenMatcher {
    token: Vec<char>,
    matched: usize,
}

impl TokenMatcher {
    pub fn new(token: Vec<char>) -> Self {
        Self { token, matched: 0 }
    }

    pub fn token(&self) -> &[char] {
        &self.token
    }

    /// An empty token never matches.
    pub fn is_disabled(&self) -> bool {
        self.token.is_empty()
    }

    /// Characters currently held back as a tentative match.
    pub fn pending(&self) -> &[char] {
        &self.token[..self.matched]
    }

    pub fn reset(&mut self) {
        self.matched = 0;
    }

    /// Feed one character, appending whatever is settled as content to `out`.
    pub fn feed(&mut self, c: char, out: &mut String) -> Step {
        if self.is_disabled() {
            out.push(c);
            return Step::Consumed;
        }

        if self.token[self.matched] == c {
            self.matched += 1;
            if self.matched == self.token.len() {
                self.matched = 0;
                return Step::Boundary;
            }
            return Step::Consumed;
        }

        if self.matched == 0 {
            out.push(c);
            return Step::Consumed;
        }

        // The tentative prefix was not the token. Its first character is
        // content; the rest may still start a match, so run it back through.
        let replay: Vec<char> = self.token[1..self.matched]
            .iter()
            .copied()
            .chain(std::iter::once(c))
            .collect();
        out.push(self.token[0]);
        self.matched = 0;
        for r in replay {
            // The replay is shorter than the token, so it cannot complete it.
            self.feed(r, out);
        }
        Step::Consumed
    }

    /// Give up on a tentative match (end of stream): its characters are content.
    pub fn flush(&mut self, out: &mut String) {
        out.extend(self.pending());
        self.matched = 0;
    }

    /// Whether `next`, following a completed token, completes the same token
    /// again one character further on (`{{` followed by `{`).
    ///
    /// Single-character tokens never realign: a doubled token is two tokens.
    pub fn realigns_with(&self, next: char) -> bool {
        if self.token.len() < 2 {
            return false;
        }
        match self.token.split_last() {
            Some((&last, init)) => last == next && self.token[1..] == *init,
            None => false,
        }
    }
}
