//! Crate root: wires together the compilation pipeline.
//!
//! The stages are small and composable:
//! - `source` maps offsets to line/column pairs for diagnostics.
//! - `scanner` performs lexical analysis, one token per request.
//! - `parser` builds the expression tree and collects syntax diagnostics.
//! - `eval` folds the tree into a single integer.
//! - `codegen` emits a target program that prints that integer.
//! - `driver` runs the whole thing on a `.fed` file and calls the downstream
//!   compiler.
//! - `error` holds the error type shared by every stage.

pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod eval;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod token;

pub use codegen::Target;
pub use error::{CompileError, CompileResult};
pub use parser::parse_file;

/// Compile a source string into the text of a target program.
pub fn compile(name: &str, src: &str, target: Target) -> CompileResult<String> {
  let source = parser::parse_file(name, src)?;
  codegen::generate(&source, target)
}

/// Parse and fold a source string without emitting anything.
pub fn evaluate(name: &str, src: &str) -> CompileResult<i64> {
  let source = parser::parse_file(name, src)?;
  eval::fold(&source)
}
