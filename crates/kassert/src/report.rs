//! Checking results and reporting failures.

use crate::expr::Expression;
use crate::logger::Logger;
use std::fmt::{self, Write as _};
use std::io;

/// Where an assertion is in the source. Make one with `source_location!()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
  /// The file.
  pub file: &'static str,
  /// The line, one-based.
  pub line: u32,
  /// The enclosing function, as a path.
  pub function: &'static str,
}

/// Something an assertion can check: a decomposed [`Expression`], or a plain `bool`.
///
/// The plain `bool` is what remains of expressions using `&&` or `||`, so it has no expansion.
pub trait Evaluated {
  /// Returns whether the assertion holds.
  fn result(&self) -> bool;
  /// Returns the operands and operators, for the report.
  fn expansion(&self) -> Option<&dyn fmt::Display>;
}

impl Evaluated for bool {
  fn result(&self) -> bool {
    *self
  }

  fn expansion(&self) -> Option<&dyn fmt::Display> {
    None
  }
}

impl<E: Expression> Evaluated for E {
  fn result(&self) -> bool {
    Expression::result(self)
  }

  fn expansion(&self) -> Option<&dyn fmt::Display> {
    Some(self)
  }
}

/// The report of a failed assertion, buffered until [`Diagnostic::flush`] or drop.
#[derive(Debug)]
pub struct Diagnostic<W: io::Write> {
  out: Logger<W>,
}

impl<W: io::Write> Diagnostic<W> {
  /// Appends the message given to the assertion, on its own line. An empty message adds nothing.
  pub fn message(&mut self, msg: &dyn fmt::Display) {
    let msg = msg.to_string();
    if !msg.is_empty() {
      let _ = writeln!(self.out, "{msg}");
    }
  }

  /// Returns the report so far.
  #[must_use]
  pub fn buffered(&self) -> &str {
    self.out.buffered()
  }

  /// Writes out the report so far, then returns the stream, to write more to it directly.
  pub fn stream(&mut self) -> &mut W {
    self.out.stream()
  }

  /// Logs the report, then writes it out.
  pub fn flush(mut self) {
    log::error!(target: "kassert", "{}", self.out.buffered().trim_end());
    let _ = self.out.flush();
  }
}

/// Checks an assertion. On failure, returns the report, already holding:
///
/// ```text
/// <file>: In function '<function>':
/// <file>:<line>: FAILED <kind>
///   <text>
/// with expansion:
///   <expansion>
/// ```
///
/// (indented with tabs), where the last two lines are there only if `expr` has an expansion.
#[must_use]
pub fn evaluate<W, E>(
  out: W,
  kind: &str,
  location: &SourceLocation,
  text: &str,
  expr: &E,
) -> Option<Diagnostic<W>>
where
  W: io::Write,
  E: Evaluated,
{
  if expr.result() {
    return None;
  }
  let SourceLocation { file, line, function } = *location;
  let mut out = Logger::new(out);
  let _ = writeln!(out, "{file}: In function '{function}':\n{file}:{line}: FAILED {kind}\n\t{text}");
  if let Some(expansion) = expr.expansion() {
    let _ = writeln!(out, "with expansion:\n\t{expansion}");
  }
  Some(Diagnostic { out })
}

/// Returns the description of a failed `throwing_kassert!`.
#[must_use]
pub fn build_what(expression: &str, location: &SourceLocation, message: &dyn fmt::Display) -> String {
  let SourceLocation { file, line, function } = *location;
  format!("\n{file}: In function '{function}':\n{file}: {line}: FAILED ASSERTION\n\t{expression}\n{message}\n")
}

/// Prints the error of a `throwing_kassert!` that has to abort instead.
pub fn print_error(err: &dyn fmt::Display) {
  log::error!(target: "kassert", "{err}");
  let mut out = Logger::new(io::stderr());
  let _ = writeln!(out, "{err}");
}

/// Turns the type name of a function nested in the function of interest into the path of that
/// function.
#[must_use]
pub fn strip_function_name(name: &'static str) -> &'static str {
  let mut name = name.strip_suffix("::f").unwrap_or(name);
  while let Some(outer) = name.strip_suffix("::{{closure}}") {
    name = outer;
  }
  name
}
