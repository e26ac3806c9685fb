//! Whole-file compilation: read a `.fed` file, emit the intermediate program
//! next to it and hand that to a downstream compiler.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};
use snafu::{ResultExt, ensure};

use crate::codegen::{self, Target};
use crate::error::{CompileResult, ExtensionSnafu, IoSnafu, SpawnSnafu, ToolchainSnafu};
use crate::parser;

/// Extension every source file must carry.
pub const SOURCE_EXTENSION: &str = "fed";

#[derive(Debug, Clone, Default)]
pub struct Options {
  /// Downstream compiler; defaults to the target's usual one.
  pub cc: Option<String>,
  /// Compiler arguments placed before the emitted file, whitespace separated.
  pub cflags: Option<String>,
  pub target: Target,
  /// Keep the emitted program after compiling it.
  pub keep: bool,
  /// Stop once the emitted program is written.
  pub ir: bool,
}

impl Options {
  /// Compiler program and its arguments for an artifact whose executable
  /// should land at `output`.
  pub fn toolchain(&self, output: &Path) -> (String, Vec<String>) {
    let program = match (&self.cc, self.target) {
      (Some(cc), _) => cc.clone(),
      (None, Target::Go) => "go".to_string(),
      (None, Target::C) => "cc".to_string(),
    };
    let args = match (&self.cflags, self.target) {
      (Some(flags), _) => flags.split_whitespace().map(str::to_string).collect(),
      (None, Target::Go) => vec![
        "build".to_string(),
        "-o".to_string(),
        output.display().to_string(),
      ],
      (None, Target::C) => vec!["-o".to_string(), output.display().to_string()],
    };
    (program, args)
  }
}

/// Compile `input`. Returns the path of the emitted program, which no longer
/// exists unless `keep` or `ir` was requested.
pub fn run(input: &Path, options: &Options) -> CompileResult<PathBuf> {
  ensure!(
    input.extension().is_some_and(|ext| ext == SOURCE_EXTENSION),
    ExtensionSnafu { path: input }
  );

  let src = fs::read_to_string(input).context(IoSnafu { path: input })?;
  let stem = input.with_extension("");
  let name = stem.display().to_string();

  println!("> Parsing File");
  let source = parser::parse_file(&name, &src)?;

  println!("> Compiling: {name}");
  let artifact = input.with_extension(options.target.extension());
  codegen::write_program(&artifact, &source, options.target)?;

  if options.ir {
    println!("> Stopping at Intermediary Language");
    return Ok(artifact);
  }

  let result = invoke(&artifact, &stem, options);
  if !options.keep {
    cleanup(&artifact);
  }
  result.map(|()| artifact)
}

fn invoke(artifact: &Path, stem: &Path, options: &Options) -> CompileResult<()> {
  let (program, args) = options.toolchain(stem);
  debug!("running {program} {args:?} {}", artifact.display());

  let output = Command::new(&program)
    .args(&args)
    .arg(artifact)
    .output()
    .context(SpawnSnafu {
      program: program.as_str(),
    })?;

  let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
  combined.push_str(&String::from_utf8_lossy(&output.stderr));
  ensure!(
    output.status.success(),
    ToolchainSnafu {
      program,
      status: output.status,
      output: combined,
    }
  );
  Ok(())
}

fn cleanup(artifact: &Path) {
  if let Err(err) = fs::remove_file(artifact) {
    warn!("could not remove {}: {err}", artifact.display());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;

  #[test]
  fn default_toolchains() {
    let out = Path::new("build/answer");
    let go = Options::default();
    assert_eq!(
      go.toolchain(out),
      (
        "go".to_string(),
        vec!["build".to_string(), "-o".to_string(), "build/answer".to_string()]
      )
    );

    let c = Options {
      target: Target::C,
      ..Options::default()
    };
    assert_eq!(
      c.toolchain(out),
      (
        "cc".to_string(),
        vec!["-o".to_string(), "build/answer".to_string()]
      )
    );
  }

  #[test]
  fn explicit_compiler_and_flags_win() {
    let options = Options {
      cc: Some("gcc".to_string()),
      cflags: Some("  -O2   -static ".to_string()),
      target: Target::C,
      ..Options::default()
    };
    let (program, args) = options.toolchain(Path::new("x"));
    assert_eq!(program, "gcc");
    assert_eq!(args, vec!["-O2".to_string(), "-static".to_string()]);
  }

  #[test]
  fn rejects_other_extensions() {
    let err = run(Path::new("calc.txt"), &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Extension { .. }));
    let err = run(Path::new("calc"), &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Extension { .. }));
  }

  #[test]
  fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&dir.path().join("absent.fed"), &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
  }

  #[test]
  fn ir_mode_keeps_the_emitted_program() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sum.fed");
    fs::write(&input, "(+ 1 2 3)\n").unwrap();
    let options = Options {
      ir: true,
      ..Options::default()
    };
    let artifact = run(&input, &options).unwrap();
    assert_eq!(artifact, dir.path().join("sum.go"));
    let program = fs::read_to_string(&artifact).unwrap();
    assert!(program.contains("strconv.FormatInt(6, 10)"));
  }

  #[test]
  fn syntax_errors_emit_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.fed");
    fs::write(&input, "(+ 1)").unwrap();
    let options = Options {
      ir: true,
      ..Options::default()
    };
    let err = run(&input, &options).unwrap_err();
    assert!(matches!(err, CompileError::Syntax { .. }));
    assert!(!dir.path().join("bad.go").exists());
  }
}
