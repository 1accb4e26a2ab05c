/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Templates with embedded code.
//!
//! A template is text with code regions between a start and an end token
//! (`<$` and `$>` by default). Executing it writes the text verbatim and
//! replaces each code region with whatever the code printed, or with its
//! result value if it printed nothing:
//!
//! ```text
//! Hello <$ print(context.Name) $>!      ->  Hello Alice!
//! <$- 1 + 2 -$>                         ->  3
//! ```
//!
//! # Architecture
//!
//! Segmentation lives in [`weave_codebuffer`]; this crate adds the
//! orchestration around it:
//!
//! - [`Template`] - owns the source buffer and serializes parse/exec
//! - [`Evaluator`] - caller-supplied interpreter for the code parts
//! - [`OutputBuffer`] - captures what a code part prints
//! - [`Imports`] - remembers which symbols the evaluator already has
//!
//! # Example
//!
//! ```ignore
//! use weave_template::{Template, Value};
//!
//! let template = Template::new(MyEvaluator::default());
//! template.parse_str("Hello <$ context.Name $>!")?;
//!
//! let output = template.exec_to_string(&context)?;
//! assert_eq!(output, "Hello Alice!");
//! ```

pub mod error;
pub mod evaluator;
pub mod import;
pub mod output;
pub mod template;
pub mod value;

// Re-export main types at crate root
pub use error::{TemplateError, TemplateResult};
pub use evaluator::{EvalError, Evaluator};
pub use import::{Import, Imports, import_block};
pub use output::OutputBuffer;
pub use template::Template;
pub use value::Value;

pub use weave_codebuffer::{Delimiters, TrimSet};
