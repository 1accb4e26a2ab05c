/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The seam between templates and the code embedded in them.
//!
//! This crate only decides which code runs and where its output goes. Running
//! it is up to an [`Evaluator`] supplied by the caller.

use crate::import::Import;
use crate::output::OutputBuffer;
use crate::value::Value;

/// Error reported by an evaluator.
pub type EvalError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for running the code parts of a template.
///
/// Implementations keep whatever interpreter state they need between calls;
/// definitions made by one code part are expected to be visible to later
/// ones.
pub trait Evaluator {
    /// The value code can refer to (exposed as `context` by convention).
    type Context: ?Sized;

    /// Make `imports` available to subsequent code.
    ///
    /// Called only with imports not seen before. The default does nothing,
    /// for languages without a module system.
    fn import(&mut self, imports: &[Import]) -> Result<(), EvalError> {
        let _ = imports;
        Ok(())
    }

    /// Run one code part.
    ///
    /// # Arguments
    /// * `code` - The code between the delimiters, never whitespace-only
    /// * `context` - The value passed to [`Template::exec`](crate::Template::exec)
    /// * `out` - Everything written here becomes the part's output
    ///
    /// # Returns
    /// The value the code evaluated to. It is printed in place of the code
    /// only if nothing was written to `out`.
    ///
    /// # Panics
    /// A panic here is caught by the template and reported as
    /// [`TemplateError::Evaluation`](crate::TemplateError::Evaluation). The
    /// evaluator stays in use afterwards, in whatever state the panic left it.
    fn eval(
        &mut self,
        code: &str,
        context: &Self::Context,
        out: &mut OutputBuffer,
    ) -> Result<Value, EvalError>;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    type Context = E::Context;

    fn import(&mut self, imports: &[Import]) -> Result<(), EvalError> {
        (**self).import(imports)
    }

    fn eval(
        &mut self,
        code: &str,
        context: &Self::Context,
        out: &mut OutputBuffer,
    ) -> Result<Value, EvalError> {
        (**self).eval(code, context, out)
    }
}
