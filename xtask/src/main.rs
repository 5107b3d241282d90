//! A task runner using the [xtask spec][1].
//!
//! [1]: https://github.com/matklad/cargo-xtask

use anyhow::{bail, Context as _, Result};
use pico_args::Arguments;
use std::path::Path;
use xshell::{cmd, pushd};

/// Values of `KASSERT_ASSERTION_LEVEL` to test with: below, at, and well above the default.
const LEVELS: [&str; 3] = ["kthrow", "normal", "1000"];

#[inline]
fn show_help() {
  print!("{}", include_str!("help.txt"));
}

fn finish_args(args: Arguments) -> Result<()> {
  let args = args.finish();
  if !args.is_empty() {
    bail!("unused arguments: {:?}", args);
  }
  Ok(())
}

fn levels() -> Result<()> {
  for level in LEVELS {
    println!("KASSERT_ASSERTION_LEVEL={level}");
    cmd!("cargo test --package kassert").env("KASSERT_ASSERTION_LEVEL", level).run()?;
    cmd!("cargo test --package kassert --features exception-mode")
      .env("KASSERT_ASSERTION_LEVEL", level)
      .run()?;
  }
  Ok(())
}

fn run() -> Result<()> {
  let mut args = Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    show_help();
    return Ok(());
  }
  let subcommand = match args.subcommand()? {
    Some(x) => x,
    None => {
      show_help();
      return Ok(());
    }
  };
  let root = Path::new(env!("CARGO_MANIFEST_DIR")).parent().context("no workspace root")?;
  let _d = pushd(root)?;
  match subcommand.as_str() {
    "ci" => {
      finish_args(args)?;
      cmd!("cargo test --no-run").run()?;
      cmd!("cargo fmt -- --check").run()?;
      cmd!("cargo clippy").run()?;
      cmd!("cargo test").run()?;
      levels()?;
    }
    "levels" => {
      finish_args(args)?;
      levels()?;
    }
    s => bail!("unknown subcommand: {}", s),
  }
  Ok(())
}

fn main() {
  match run() {
    Ok(()) => {}
    Err(e) => {
      eprintln!("{}", e);
      std::process::exit(1);
    }
  }
}
