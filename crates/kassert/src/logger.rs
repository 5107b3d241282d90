//! See [`Logger`].

use std::fmt;
use std::io;

/// Buffers text and writes it out all at once.
///
/// Everything written goes to an in-memory buffer first, which is written to the underlying
/// stream in one `write_all` on [`Logger::flush`] or when the logger is dropped. This keeps a
/// report from interleaving with output from other threads or processes. It's best-effort: the
/// stream itself may still split the write.
pub struct Logger<W: io::Write> {
  buf: String,
  out: W,
}

impl<W: io::Write> Logger<W> {
  /// Returns a new logger for the stream.
  #[must_use]
  pub fn new(out: W) -> Self {
    Self { buf: String::new(), out }
  }

  /// Returns what has been written but not yet flushed.
  #[must_use]
  pub fn buffered(&self) -> &str {
    self.buf.as_str()
  }

  /// Writes the buffer to the stream and empties it.
  ///
  /// # Errors
  ///
  /// If writing to the stream failed.
  pub fn flush(&mut self) -> io::Result<()> {
    if !self.buf.is_empty() {
      self.out.write_all(self.buf.as_bytes())?;
      self.buf.clear();
    }
    self.out.flush()
  }

  /// Flushes, then returns the stream.
  pub fn stream(&mut self) -> &mut W {
    // an error here will come up again on the next write to the stream.
    let _ = self.flush();
    &mut self.out
  }
}

impl<W: io::Write> fmt::Write for Logger<W> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    self.buf.push_str(s);
    Ok(())
  }
}

impl<W: io::Write> Drop for Logger<W> {
  fn drop(&mut self) {
    let _ = self.flush();
  }
}

impl<W: io::Write> fmt::Debug for Logger<W> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Logger").field("buf", &self.buf).finish_non_exhaustive()
  }
}
