/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parsing and executing templates.
//!
//! A [`Template`] ties a [`CodeBuffer`] to an [`Evaluator`]. Executing it walks
//! the parts in order: text is written as-is, code is evaluated and replaced by
//! what it printed. The source is read once; later executions replay the
//! parts found by the first.
//!
//! All operations take `&self` and are serialized by an internal lock, so a
//! template can be shared between threads.

use crate::error::{TemplateError, TemplateResult};
use crate::evaluator::Evaluator;
use crate::import::{Import, Imports};
use crate::output::OutputBuffer;
use std::any::Any;
use std::io::{self, BufReader, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use weave_codebuffer::{CodeBuffer, Delimiters, PartIterator, PartType, RuneRead, Utf8Reader};

struct State<E> {
    evaluator: E,
    imports: Imports,
    output: OutputBuffer,
    buffer: Option<CodeBuffer>,
}

pub struct Template<E> {
    delimiters: Delimiters,
    state: Mutex<State<E>>,
    /// Committed-parts counter of the attached buffer, readable while an
    /// execution holds the state lock.
    progress: RwLock<Option<Arc<AtomicUsize>>>,
}

impl<E: Evaluator> Template<E> {
    /// A template with the default `<$ … $>` delimiters and no source yet.
    pub fn new(evaluator: E) -> Self {
        Self {
            delimiters: Delimiters::default(),
            state: Mutex::new(State {
                evaluator,
                imports: Imports::new(),
                output: OutputBuffer::new(),
                buffer: None,
            }),
            progress: RwLock::new(None),
        }
    }

    /// Use `delimiters` for every source parsed from now on.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    fn lock(&self) -> MutexGuard<'_, State<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a fresh buffer over `reader`, replacing any earlier source.
    fn attach(
        &self,
        state: &mut State<E>,
        reader: impl RuneRead + Send + 'static,
    ) -> TemplateResult<()> {
        let buffer = CodeBuffer::new(reader, self.delimiters.clone())?;
        let mut progress = self.progress.write().unwrap_or_else(PoisonError::into_inner);
        *progress = Some(buffer.progress());
        state.buffer = Some(buffer);
        Ok(())
    }

    /// Attach `reader` as the template source without reading from it.
    ///
    /// The source is scanned during the first [`exec`](Self::exec), only as
    /// far as execution gets.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Scan`] if the delimiters are invalid.
    pub fn lazy_parse(&self, reader: impl RuneRead + Send + 'static) -> TemplateResult<()> {
        let mut state = self.lock();
        self.attach(&mut state, reader)?;
        tracing::debug!("Template source attached");
        Ok(())
    }

    /// [`lazy_parse`](Self::lazy_parse) over a byte stream.
    pub fn lazy_parse_reader(&self, reader: impl io::Read + Send + 'static) -> TemplateResult<()> {
        self.lazy_parse(Utf8Reader::new(BufReader::new(reader)))
    }

    /// Attach `reader` and scan all of it now. Returns the number of parts.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Scan`] if the delimiters are invalid or the
    /// reader fails.
    pub fn parse(&self, reader: impl RuneRead + Send + 'static) -> TemplateResult<usize> {
        let mut state = self.lock();
        self.attach(&mut state, reader)?;
        let buffer = state.buffer.as_mut().ok_or(TemplateError::NotParsed)?;
        let parts = buffer.parse_all()?;
        tracing::debug!(parts, "Template parsed");
        Ok(parts)
    }

    pub fn parse_str(&self, source: &str) -> TemplateResult<usize> {
        self.parse(Utf8Reader::from_string(source))
    }

    pub fn parse_bytes(&self, source: impl Into<Vec<u8>>) -> TemplateResult<usize> {
        self.parse(Utf8Reader::from_bytes(source))
    }

    /// [`parse`](Self::parse) over a byte stream.
    pub fn parse_reader(&self, reader: impl io::Read + Send + 'static) -> TemplateResult<usize> {
        self.parse(Utf8Reader::new(BufReader::new(reader)))
    }

    /// Make `imports` available to code, skipping those already imported.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Evaluation`] if the evaluator rejects them.
    /// Nothing is recorded as imported in that case.
    pub fn import(&self, imports: &[Import]) -> TemplateResult<()> {
        let mut state = self.lock();
        let missing = state.imports.missing(imports);
        if missing.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = missing.len(), "Importing symbols");
        state
            .evaluator
            .import(&missing)
            .map_err(TemplateError::Evaluation)?;
        state.imports.extend(missing);
        Ok(())
    }

    /// Names and paths imported so far.
    pub fn imports(&self) -> Vec<Import> {
        self.lock().imports.iter().cloned().collect()
    }

    /// Render the template into `out`, returning the number of bytes written.
    ///
    /// Stops at the first failure. Output written before it stays written.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::NotParsed`] if no source was ever attached
    /// - [`TemplateError::Scan`] if reading the source fails
    /// - [`TemplateError::Evaluation`] if a code part fails
    /// - [`TemplateError::Io`] if writing to `out` fails
    pub fn exec<W: Write + ?Sized>(
        &self,
        out: &mut W,
        context: &E::Context,
    ) -> TemplateResult<usize> {
        let mut guard = self.lock();
        let State {
            evaluator,
            output,
            buffer,
            ..
        } = &mut *guard;
        let buffer = buffer.as_mut().ok_or(TemplateError::NotParsed)?;

        let mut it = buffer.iterator()?;
        let mut total = 0;
        while it.advance() {
            let Some(part) = it.value().cloned() else {
                break;
            };
            match part.part_type() {
                PartType::Text => {
                    out.write_all(part.content())?;
                    total += part.len();
                }
                PartType::Code => {
                    total += exec_code(evaluator, output, part.as_str(), out, context)?;
                }
            }
        }
        if let Some(err) = it.error() {
            return Err(err.clone().into());
        }
        tracing::debug!(bytes = total, "Template executed");
        Ok(total)
    }

    /// Render the template into a string.
    ///
    /// Code output that is not valid UTF-8 is replaced lossily.
    pub fn exec_to_string(&self, context: &E::Context) -> TemplateResult<String> {
        let mut out: Vec<u8> = Vec::new();
        self.exec(&mut out, context)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Number of parts found in the source so far.
    pub fn progress(&self) -> usize {
        self.progress
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |progress| progress.load(Ordering::Acquire))
    }

    /// True once a source is attached and has been read to the end.
    pub fn is_parsed(&self) -> bool {
        self.lock()
            .buffer
            .as_ref()
            .is_some_and(CodeBuffer::is_complete)
    }
}

/// Evaluate one code part and write its output to `out`.
fn exec_code<E: Evaluator, W: Write + ?Sized>(
    evaluator: &mut E,
    output: &mut OutputBuffer,
    code: &str,
    out: &mut W,
    context: &E::Context,
) -> TemplateResult<usize> {
    if code.trim().is_empty() {
        return Ok(0);
    }

    output.begin();
    let result = panic::catch_unwind(AssertUnwindSafe(|| evaluator.eval(code, context, output)))
        .unwrap_or_else(|payload| Err(panic_message(payload).into()));
    if let Ok(value) = &result {
        if output.is_empty() && value.is_printable() {
            output.write_all(value.implicit_output().as_bytes())?;
        }
    }
    let captured = output.finish();

    if let Err(err) = result {
        tracing::debug!(error = %err, "Code part failed");
        return Err(TemplateError::Evaluation(err));
    }
    out.write_all(&captured)?;
    Ok(captured.len())
}

/// Text of a panic payload raised by `panic!` with a literal or formatted message.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("evaluator panicked: {message}")
}
