//! Shared error type for every stage of the pipeline.
//!
//! Syntax problems are collected rather than raised one by one, so the two
//! syntax variants carry the whole [`Diagnostics`] list. Everything else is a
//! hard fault: evaluation faults, I/O and the downstream toolchain.

use std::num::ParseIntError;
use std::path::PathBuf;

use snafu::Snafu;

use crate::diagnostics::Diagnostics;
use crate::source::Position;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  #[snafu(display("{diagnostics}"))]
  Syntax { diagnostics: Diagnostics },

  #[snafu(display("{diagnostics}\ntoo many errors"))]
  TooManyErrors { diagnostics: Diagnostics },

  #[snafu(display("{position} invalid integer literal '{literal}': {source}"))]
  InvalidLiteral {
    position: Position,
    literal: String,
    source: ParseIntError,
  },

  #[snafu(display("{position} division by zero"))]
  DivisionByZero { position: Position },

  #[snafu(display("{position} integer overflow"))]
  Overflow { position: Position },

  #[snafu(display("{position} binary expression has no operands"))]
  MissingOperands { position: Position },

  #[snafu(display("source files should have the '.fed' extension: {}", path.display()))]
  Extension { path: PathBuf },

  #[snafu(display("{}: {source}", path.display()))]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },

  #[snafu(display("failed to run {program}: {source}"))]
  Spawn {
    program: String,
    source: std::io::Error,
  },

  #[snafu(display("{output}{program} exited with {status}"))]
  Toolchain {
    program: String,
    status: std::process::ExitStatus,
    output: String,
  },
}

impl CompileError {
  /// The collected syntax diagnostics, if this is a syntax failure.
  pub fn diagnostics(&self) -> Option<&Diagnostics> {
    match self {
      Self::Syntax { diagnostics } | Self::TooManyErrors { diagnostics } => Some(diagnostics),
      _ => None,
    }
  }
}
