//! Code generation: fold the program and emit a target-language program
//! that prints the result.
//!
//! No arithmetic survives into the output. The emitted program is a single
//! print of the folded constant, so the downstream compiler only ever sees a
//! trivial `main`.

use std::fs;
use std::path::Path;

use log::debug;
use snafu::ResultExt;

use crate::ast::Source;
use crate::error::{CompileResult, IoSnafu};
use crate::eval;

/// Language of the emitted program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Target {
  #[default]
  Go,
  C,
}

impl Target {
  /// File extension of the emitted program, without the dot.
  pub fn extension(self) -> &'static str {
    match self {
      Self::Go => "go",
      Self::C => "c",
    }
  }
}

/// Fold `source` and return the emitted program text.
pub fn generate(source: &Source, target: Target) -> CompileResult<String> {
  let value = eval::fold(source)?;
  Ok(emit(value, target))
}

/// Emit a program whose only behavior is printing `value` in base 10.
pub fn emit(value: i64, target: Target) -> String {
  let mut out = String::new();
  match target {
    Target::Go => {
      out.push_str("package main\n\n");
      out.push_str("import (\n");
      out.push_str("\t\"fmt\"\n");
      out.push_str("\t\"strconv\"\n");
      out.push_str(")\n\n");
      out.push_str("func main() {\n");
      out.push_str(&format!("\tfmt.Println(strconv.FormatInt({value}, 10))\n"));
      out.push_str("}\n");
    }
    Target::C => {
      // printed from a string so i64::MIN needs no special casing
      out.push_str("#include <stdio.h>\n\n");
      out.push_str("int main(void) {\n");
      out.push_str(&format!("  puts(\"{value}\");\n"));
      out.push_str("  return 0;\n");
      out.push_str("}\n");
    }
  }
  out
}

/// Fold `source` and write the emitted program to `path`.
pub fn write_program(path: &Path, source: &Source, target: Target) -> CompileResult<()> {
  let program = generate(source, target)?;
  fs::write(path, program).context(IoSnafu { path })?;
  debug!("wrote {}", path.display());
  Ok(())
}
