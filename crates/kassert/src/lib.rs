//! Assertions that show their operands, and that can be compiled out by level.
//!
//! ```ignore
//! use kassert::kassert;
//!
//! let (x, y) = (3, 4);
//! kassert!(x == y, "x and y differ");
//! ```
//!
//! fails with:
//!
//! ```text
//! src/main.rs: In function 'app::main':
//! src/main.rs:4: FAILED ASSERTION
//!   x == y
//! with expansion:
//!   3 == 4
//! x and y differ
//! ```
//!
//! and aborts the process. See the macros for the details:
//!
//! - [`kassert!`] checks at a level, and aborts on failure.
//! - [`throwing_kassert!`] and [`throwing_kassert_specified!`] return an error on failure if the
//!   `exception-mode` feature is on, and abort otherwise.
//! - [`kassert_enabled!`] gates other code on a level.
//!
//! Operands render through [`Render`], then [`Debug`](std::fmt::Debug), then as [`PLACEHOLDER`].
//! Every operand is evaluated exactly once.

#[cfg(test)]
mod tests;

mod error;
mod expr;
mod logger;
mod macros;
mod render;
mod report;

pub mod level;

pub use error::KassertError;
pub use expr::{Binary, Expression, Lhs, Op, Truth, Unary};
pub use logger::Logger;
pub use render::{Operand, Render, RenderFn, PLACEHOLDER};
pub use report::{Diagnostic, Evaluated, SourceLocation};

/// Whether the `exception-mode` feature is on, making `throwing_kassert!` return errors instead of
/// aborting.
pub const EXCEPTION_MODE: bool = cfg!(feature = "exception-mode");

#[doc(hidden)]
pub mod __private {
  pub use crate::expr::{
    BitPick, Lhs, Unary, ViaRefBitAnd, ViaRefBitOr, ViaRefBitXor, ViaValueBitAnd, ViaValueBitOr,
    ViaValueBitXor,
  };
  pub use crate::render::{Operand, Pick, ViaDebug, ViaPlaceholder, ViaRender};
  pub use crate::report::{build_what, evaluate, print_error, strip_function_name};
  pub use kassert_macros::decompose;
}
