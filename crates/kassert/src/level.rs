//! Assertion levels.
//!
//! A check is compiled in iff its level is at most [`ASSERTION_LEVEL`], which is fixed when this
//! crate is built (set `KASSERT_ASSERTION_LEVEL` to an integer, `kthrow`, or `normal`). Lower
//! levels are more important. Define your own levels as plain `i32` constants:
//!
//! ```ignore
//! const LIGHT: i32 = kassert::level::NORMAL - 1;
//! const HEAVY: i32 = kassert::level::NORMAL + 1;
//! ```

/// The level of `throwing_kassert!` checks when exception mode is off.
pub const KTHROW: i32 = 10;

/// The default level, used when a check gives none.
pub const NORMAL: i32 = 30;

include!(concat!(env!("OUT_DIR"), "/level.rs"));

/// Returns whether checks of this level are compiled in.
#[must_use]
pub const fn enabled(level: i32) -> bool {
  level <= ASSERTION_LEVEL
}
