//! Decomposed expressions.
//!
//! `kassert!(a == b)` becomes, roughly, `Lhs::new(a).equal(b)`: [`Lhs`] holds the left operand
//! until an operator method turns it into a [`Binary`]. A `Binary` has the same methods, so
//! `(a == b) == c` becomes `Lhs::new(a).equal(b).equal(c)`. An expression without a supported
//! operator becomes a [`Unary`].
//!
//! Every node applies its operator when it is built. Rendering only reads the captured operands.

use crate::render::Operand;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr, BitXor};

/// Values with a truth value, usable as a whole assertion.
///
/// Integers are true iff not zero.
pub trait Truth {
  /// Returns the truth value.
  fn truth(&self) -> bool;
}

impl Truth for bool {
  fn truth(&self) -> bool {
    *self
  }
}

impl<T: Truth + ?Sized> Truth for &T {
  fn truth(&self) -> bool {
    (**self).truth()
  }
}

macro_rules! truth_int {
  ($($t:ty)*) => {
    $(
      impl Truth for $t {
        fn truth(&self) -> bool {
          *self != 0
        }
      }
    )*
  };
}

truth_int! { i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize }

/// A captured operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
  /// `==`
  Eq,
  /// `!=`
  Ne,
  /// `<`
  Lt,
  /// `<=`
  Le,
  /// `>`
  Gt,
  /// `>=`
  Ge,
  /// `&`
  BitAnd,
  /// `|`
  BitOr,
  /// `^`
  BitXor,
}

impl Op {
  /// Returns the symbol, as written in source.
  #[must_use]
  pub fn symbol(self) -> &'static str {
    match self {
      Op::Eq => "==",
      Op::Ne => "!=",
      Op::Lt => "<",
      Op::Le => "<=",
      Op::Gt => ">",
      Op::Ge => ">=",
      Op::BitAnd => "&",
      Op::BitOr => "|",
      Op::BitXor => "^",
    }
  }
}

impl fmt::Display for Op {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// A decomposed expression. Displays as its operands, rendered, with their operators.
pub trait Expression: fmt::Display {
  /// Returns the result. Operands were evaluated once, when this was built; this doesn't evaluate
  /// them again.
  fn result(&self) -> bool;
}

/// An expression with one operand.
pub struct Unary<'a, T: ?Sized> {
  operand: Operand<'a, T>,
  result: bool,
}

impl<'a, T: Truth + ?Sized> Unary<'a, T> {
  /// Returns a new expression for the operand.
  #[must_use]
  pub fn new(operand: Operand<'a, T>) -> Self {
    let result = operand.value().truth();
    Self { operand, result }
  }
}

impl<T: ?Sized> Expression for Unary<'_, T> {
  fn result(&self) -> bool {
    self.result
  }
}

impl<T: ?Sized> fmt::Display for Unary<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.operand, f)
  }
}

impl<T: ?Sized> fmt::Debug for Unary<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Unary").field("operand", &self.operand).field("result", &self.result).finish()
  }
}

/// An expression with an operator.
///
/// `L` is either an [`Operand`] or another `Binary`. `V` is what the operator evaluated to; for
/// comparisons that's the `bool` result, for bitwise operators it's the output of the operator,
/// like an integer or a set of flags. Only a `V` with a [`Truth`] makes a whole assertion, as in
/// `a & b`; any other `V` must be compared further, as in `(a & b) == c`.
pub struct Binary<L, R, V = bool> {
  lhs: L,
  op: Op,
  rhs: R,
  value: V,
}

impl<L, R, V> Binary<L, R, V> {
  fn new(lhs: L, op: Op, rhs: R, value: V) -> Self {
    Self { lhs, op, rhs, value }
  }

  /// Returns the operator.
  #[must_use]
  pub fn op(&self) -> Op {
    self.op
  }

  /// Returns what the operator evaluated to.
  #[must_use]
  pub fn value(&self) -> &V {
    &self.value
  }
}

impl<L: fmt::Display, R: fmt::Display, V: Truth> Expression for Binary<L, R, V> {
  fn result(&self) -> bool {
    self.value.truth()
  }
}

impl<L: fmt::Display, R: fmt::Display, V> fmt::Display for Binary<L, R, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
  }
}

impl<L: fmt::Display, R: fmt::Display, V> fmt::Debug for Binary<L, R, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Binary").field("expr", &format_args!("{self}")).finish_non_exhaustive()
  }
}

/// The left operand of an expression, waiting for an operator.
pub struct Lhs<'a, T: ?Sized>(Operand<'a, T>);

impl<T: ?Sized> fmt::Debug for Lhs<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Lhs").field(&self.0).finish()
  }
}

macro_rules! lhs_relations {
  ($($name:ident($bound:ident, $tok:tt) => $op:ident;)*) => {
    $(
      #[doc = concat!("Applies `", stringify!($tok), "`.")]
      #[must_use]
      pub fn $name<U: ?Sized>(self, rhs: Operand<'a, U>) -> Binary<Operand<'a, T>, Operand<'a, U>>
      where
        T: $bound<U>,
      {
        let value = *self.0.value() $tok *rhs.value();
        Binary::new(self.0, Op::$op, rhs, value)
      }
    )*
  };
}

macro_rules! lhs_bitwise {
  ($($name:ident($tok:tt) => $op:ident;)*) => {
    $(
      #[doc = concat!("Applies `", stringify!($tok), "` with `apply`, from [`BitPick`].")]
      #[must_use]
      pub fn $name<U: ?Sized, O>(
        self,
        rhs: Operand<'a, U>,
        apply: fn(&'a T, &'a U) -> O,
      ) -> Binary<Operand<'a, T>, Operand<'a, U>, O> {
        let value = apply(self.0.value(), rhs.value());
        Binary::new(self.0, Op::$op, rhs, value)
      }
    )*
  };
}

impl<'a, T: ?Sized> Lhs<'a, T> {
  /// Returns a new left operand.
  #[must_use]
  pub fn new(operand: Operand<'a, T>) -> Self {
    Self(operand)
  }

  lhs_relations! {
    equal(PartialEq, ==) => Eq;
    not_equal(PartialEq, !=) => Ne;
    less(PartialOrd, <) => Lt;
    less_equal(PartialOrd, <=) => Le;
    greater(PartialOrd, >) => Gt;
    greater_equal(PartialOrd, >=) => Ge;
  }

  lhs_bitwise! {
    bit_and(&) => BitAnd;
    bit_or(|) => BitOr;
    bit_xor(^) => BitXor;
  }
}

// chaining uses the value of the inner operator, not a re-evaluation of its operands. that value
// is owned by the inner node, so bitwise operators take it, and the right operand, by copy.

macro_rules! chain_relations {
  ($($name:ident($bound:ident, $tok:tt) => $op:ident;)*) => {
    $(
      #[doc = concat!("Applies `", stringify!($tok), "` to the value of this expression.")]
      #[must_use]
      pub fn $name<'a, U: ?Sized>(self, rhs: Operand<'a, U>) -> Binary<Self, Operand<'a, U>>
      where
        V: $bound<U>,
      {
        let value = self.value $tok *rhs.value();
        Binary::new(self, Op::$op, rhs, value)
      }
    )*
  };
}

macro_rules! chain_bitwise {
  ($($name:ident($bound:ident, $tok:tt) => $op:ident;)*) => {
    $(
      #[doc = concat!("Applies `", stringify!($tok), "` to the value of this expression.")]
      #[must_use]
      pub fn $name<'a, U>(self, rhs: Operand<'a, U>) -> Binary<Self, Operand<'a, U>, V::Output>
      where
        V: Copy + $bound<U>,
        U: Copy,
      {
        let value = self.value $tok *rhs.value();
        Binary::new(self, Op::$op, rhs, value)
      }
    )*
  };
}

impl<L, R, V> Binary<L, R, V> {
  chain_relations! {
    equal(PartialEq, ==) => Eq;
    not_equal(PartialEq, !=) => Ne;
    less(PartialOrd, <) => Lt;
    less_equal(PartialOrd, <=) => Le;
    greater(PartialOrd, >) => Gt;
    greater_equal(PartialOrd, >=) => Ge;
  }

  chain_bitwise! {
    bit_and(BitAnd, &) => BitAnd;
    bit_or(BitOr, |) => BitOr;
    bit_xor(BitXor, ^) => BitXor;
  }
}

/// Picks how a bitwise operator applies to a left operand `T` and a right operand `U`.
///
/// Call `(&&BitPick::of(a, b)).bit_and()` (or `bit_or`, `bit_xor`) with the `ViaRef*` and
/// `ViaValue*` traits in scope. Operators on references, like `&a & &b`, win. Otherwise both
/// operands must be `Copy` with the operator on values, like `a & b` for a set of flags.
pub struct BitPick<'a, T: ?Sized, U: ?Sized>(PhantomData<fn(&'a T, &'a U)>);

impl<'a, T: ?Sized, U: ?Sized> BitPick<'a, T, U> {
  /// Returns a pick for the types of the operands.
  #[must_use]
  pub fn of(_: &'a T, _: &'a U) -> Self {
    Self(PhantomData)
  }
}

impl<T: ?Sized, U: ?Sized> fmt::Debug for BitPick<'_, T, U> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("BitPick")
  }
}

macro_rules! bit_tiers {
  ($($name:ident($bound:ident, $tok:tt): $by_ref:ident, $by_value:ident;)*) => {
    $(
      #[doc = concat!("Applies `", stringify!($tok), "` to references to the operands.")]
      pub trait $by_ref<'a, T: ?Sized + 'a, U: ?Sized + 'a> {
        /// What the operator evaluates to.
        type Output;
        /// Returns the function applying the operator.
        fn $name(self) -> fn(&'a T, &'a U) -> Self::Output;
      }

      impl<'a, T: ?Sized, U: ?Sized> $by_ref<'a, T, U> for &&BitPick<'a, T, U>
      where
        T: 'a,
        U: 'a,
        &'a T: $bound<&'a U>,
      {
        type Output = <&'a T as $bound<&'a U>>::Output;
        fn $name(self) -> fn(&'a T, &'a U) -> Self::Output {
          |a, b| a $tok b
        }
      }

      #[doc = concat!("Applies `", stringify!($tok), "` to copies of the operands.")]
      pub trait $by_value<'a, T: ?Sized + 'a, U: ?Sized + 'a> {
        /// What the operator evaluates to.
        type Output;
        /// Returns the function applying the operator.
        fn $name(self) -> fn(&'a T, &'a U) -> Self::Output;
      }

      impl<'a, T, U> $by_value<'a, T, U> for &BitPick<'a, T, U>
      where
        T: Copy + $bound<U> + 'a,
        U: Copy + 'a,
      {
        type Output = T::Output;
        fn $name(self) -> fn(&'a T, &'a U) -> Self::Output {
          |a, b| *a $tok *b
        }
      }
    )*
  };
}

bit_tiers! {
  bit_and(BitAnd, &): ViaRefBitAnd, ViaValueBitAnd;
  bit_or(BitOr, |): ViaRefBitOr, ViaValueBitOr;
  bit_xor(BitXor, ^): ViaRefBitXor, ViaValueBitXor;
}
