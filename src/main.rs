use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use federal::codegen::Target;
use federal::driver::{self, Options};

/// Compiler for `.fed` arithmetic programs
#[derive(Parser, Debug)]
#[command(name = "federal", version, about, long_about = None)]
struct Args {
  /// Source file, must end in `.fed`
  file: PathBuf,

  /// Downstream compiler (default: `go`, or `cc` for the C target)
  #[arg(long)]
  cc: Option<String>,

  /// Compiler arguments placed before the emitted file, whitespace separated
  #[arg(long, allow_hyphen_values = true)]
  cflags: Option<String>,

  /// Language of the emitted program
  #[arg(long, value_enum, default_value_t = Target::Go)]
  target: Target,

  /// Keep the emitted program
  #[arg(long)]
  keep: bool,

  /// Stop after writing the emitted program
  #[arg(long)]
  ir: bool,
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let args = Args::parse();
  let options = Options {
    cc: args.cc,
    cflags: args.cflags,
    target: args.target,
    keep: args.keep,
    ir: args.ir,
  };

  match driver::run(&args.file, &options) {
    Ok(_) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{err}");
      ExitCode::FAILURE
    }
  }
}
