/*
 * import.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Symbols made available to evaluated code.
//!
//! A template remembers what it has already imported so the evaluator is
//! asked for each symbol once. Two imports are the same when their names are
//! equal and their paths are equal ignoring ASCII case.

use std::fmt;

/// One import: a path, optionally bound to a local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub name: Option<String>,
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
        }
    }

    /// Whether `other` refers to the same symbol.
    pub fn matches(&self, other: &Import) -> bool {
        self.name == other.name && self.path.eq_ignore_ascii_case(&other.path)
    }
}

/// Renders as an import line: `"path"` or `name "path"`.
impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} \"{}\"", name, self.path),
            None => write!(f, "\"{}\"", self.path),
        }
    }
}

/// The imports a template has already handed to its evaluator.
#[derive(Debug, Clone, Default)]
pub struct Imports {
    imports: Vec<Import>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, import: &Import) -> bool {
        self.imports.iter().any(|i| i.matches(import))
    }

    /// The entries of `requested` not imported yet, without repeats.
    pub fn missing(&self, requested: &[Import]) -> Vec<Import> {
        let mut missing: Vec<Import> = Vec::new();
        for import in requested {
            if !self.contains(import) && !missing.iter().any(|m| m.matches(import)) {
                missing.push(import.clone());
            }
        }
        missing
    }

    pub fn extend(&mut self, imports: impl IntoIterator<Item = Import>) {
        for import in imports {
            if !self.contains(&import) {
                self.imports.push(import);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter()
    }
}

/// Render `imports` as a single import statement.
///
/// One import renders on one line; several render as a parenthesized block.
pub fn import_block(imports: &[Import]) -> String {
    match imports {
        [] => String::new(),
        [single] => format!("import {}", single),
        _ => {
            let mut block = String::from("import (\n");
            for import in imports {
                block.push_str(&import.to_string());
                block.push('\n');
            }
            block.push(')');
            block
        }
    }
}
