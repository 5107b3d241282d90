//! Turning operand values into text for reports.
//!
//! A value renders through the first of these its type has:
//!
//! 1. [`Render`], the hook to implement for your own types
//! 2. [`fmt::Debug`]
//! 3. nothing, rendering as [`PLACEHOLDER`]
//!
//! The choice is made at the assertion site, where the operand's type is concrete, by
//! [`Pick`]. A type without a renderer is never a compile error.

use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

/// What a value without a renderer renders as.
pub const PLACEHOLDER: &str = "<?>";

/// Values that can be shown in an assertion report.
///
/// Implemented for primitives, strings, sequences (`[e1, e2, ...]`), pairs (`(first, second)`),
/// and a few wrappers.
pub trait Render {
  /// Writes this value.
  ///
  /// # Errors
  ///
  /// If writing failed.
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! render_display {
  ($($t:ty)*) => {
    $(
      impl Render for $t {
        fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
          fmt::Display::fmt(self, f)
        }
      }
    )*
  };
}

render_display! {
  bool char str String
  i8 i16 i32 i64 i128 isize
  u8 u16 u32 u64 u128 usize
  f32 f64
}

impl<T: Render + ?Sized> Render for &T {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    (**self).render(f)
  }
}

impl<T: Render + ?Sized> Render for &mut T {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    (**self).render(f)
  }
}

impl<T: Render + ?Sized> Render for Box<T> {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    (**self).render(f)
  }
}

impl<T: Render> Render for Option<T> {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      None => f.write_str("None"),
      Some(x) => {
        f.write_str("Some(")?;
        x.render(f)?;
        f.write_str(")")
      }
    }
  }
}

fn sequence<'a, T, I>(iter: I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
  T: Render + 'a,
  I: IntoIterator<Item = &'a T>,
{
  f.write_str("[")?;
  for (idx, x) in iter.into_iter().enumerate() {
    if idx != 0 {
      f.write_str(", ")?;
    }
    x.render(f)?;
  }
  f.write_str("]")
}

impl<T: Render> Render for [T] {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    sequence(self, f)
  }
}

impl<T: Render, const N: usize> Render for [T; N] {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    sequence(self, f)
  }
}

impl<T: Render> Render for Vec<T> {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    sequence(self, f)
  }
}

impl<T: Render> Render for VecDeque<T> {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    sequence(self, f)
  }
}

impl<A: Render, B: Render> Render for (A, B) {
  fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    self.0.render(f)?;
    f.write_str(", ")?;
    self.1.render(f)?;
    f.write_str(")")
  }
}

/// A function rendering a `T`.
pub type RenderFn<T> = fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result;

/// A borrowed operand of an assertion, with the renderer picked for its type.
pub struct Operand<'a, T: ?Sized> {
  value: &'a T,
  render: RenderFn<T>,
}

impl<'a, T: ?Sized> Operand<'a, T> {
  /// Returns a new operand.
  #[must_use]
  pub fn new(value: &'a T, render: RenderFn<T>) -> Self {
    Self { value, render }
  }

  /// Returns the value.
  #[must_use]
  pub fn value(&self) -> &'a T {
    self.value
  }
}

impl<T: ?Sized> fmt::Display for Operand<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    (self.render)(self.value, f)
  }
}

impl<T: ?Sized> fmt::Debug for Operand<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Operand").field(&format_args!("{self}")).finish()
  }
}

/// Picks the renderer for a `T`.
///
/// Call `(&&Pick::of(x)).renderer()` with [`ViaRender`], [`ViaDebug`] and [`ViaPlaceholder`] in
/// scope. Method resolution tries `&&Pick`, then `&Pick`, then `Pick`, so the first renderer
/// the type has wins.
pub struct Pick<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> Pick<T> {
  /// Returns a pick for the type of the value.
  #[must_use]
  pub fn of(_: &T) -> Self {
    Self(PhantomData)
  }
}

// by hand, since derives would require `T: Copy`. the placeholder tier takes the pick by value
// out of `&&Pick`, so it must be `Copy` for any `T`.
impl<T: ?Sized> Clone for Pick<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T: ?Sized> Copy for Pick<T> {}

impl<T: ?Sized> fmt::Debug for Pick<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Pick")
  }
}

/// Renders through [`Render`].
pub trait ViaRender {
  /// The type to render.
  type Value: ?Sized;
  /// Returns the renderer.
  fn renderer(self) -> RenderFn<Self::Value>;
}

impl<T: Render + ?Sized> ViaRender for &&Pick<T> {
  type Value = T;
  fn renderer(self) -> RenderFn<T> {
    T::render
  }
}

/// Renders through [`fmt::Debug`].
pub trait ViaDebug {
  /// The type to render.
  type Value: ?Sized;
  /// Returns the renderer.
  fn renderer(self) -> RenderFn<Self::Value>;
}

impl<T: fmt::Debug + ?Sized> ViaDebug for &Pick<T> {
  type Value = T;
  fn renderer(self) -> RenderFn<T> {
    <T as fmt::Debug>::fmt
  }
}

/// Renders as [`PLACEHOLDER`].
pub trait ViaPlaceholder {
  /// The type to render.
  type Value: ?Sized;
  /// Returns the renderer.
  fn renderer(self) -> RenderFn<Self::Value>;
}

impl<T: ?Sized> ViaPlaceholder for Pick<T> {
  type Value = T;
  fn renderer(self) -> RenderFn<T> {
    placeholder::<T>
  }
}

fn placeholder<T: ?Sized>(_: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
  f.write_str(PLACEHOLDER)
}
