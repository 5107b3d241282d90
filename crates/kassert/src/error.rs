//! See [`KassertError`].

use std::fmt;

/// The error returned by a failed `throwing_kassert!` in exception mode.
///
/// Its text names the failed expression, where it is, and the message given to the macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KassertError {
  what: String,
}

impl KassertError {
  /// Returns a new error with this description.
  #[must_use]
  pub fn new<S: Into<String>>(what: S) -> Self {
    Self { what: what.into() }
  }

  /// Returns the description.
  #[must_use]
  pub fn what(&self) -> &str {
    self.what.as_str()
  }
}

impl fmt::Display for KassertError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.what)
  }
}

impl std::error::Error for KassertError {}
