//! The user-facing macros.

/// Returns the path of the enclosing function, like `my_crate::module::function`.
///
/// Closures are not counted: inside one, this names the function the closure is in.
#[macro_export]
macro_rules! function_name {
  () => {{
    fn f() {}
    $crate::__private::strip_function_name(::core::any::type_name_of_val(&f))
  }};
}

/// Returns the [`SourceLocation`](crate::SourceLocation) of the call.
#[macro_export]
macro_rules! source_location {
  () => {
    $crate::SourceLocation {
      file: ::core::file!(),
      line: ::core::line!(),
      function: $crate::function_name!(),
    }
  };
}

/// Returns whether checks at this level are compiled in, as a constant.
///
/// Use it to skip code that only exists to feed checks:
///
/// ```ignore
/// if kassert_enabled!(HEAVY) {
///   let sorted = items.windows(2).all(|w| w[0] <= w[1]);
///   kassert!(sorted, "items not sorted", HEAVY);
/// }
/// ```
#[macro_export]
macro_rules! kassert_enabled {
  ($level:expr) => {
    const { $crate::level::enabled($level) }
  };
}

/// Asserts that an expression is true, else reports it and aborts.
///
/// Takes the expression, then optionally a message (any [`Display`](std::fmt::Display) value,
/// like `format_args!(...)`, evaluated only on failure), then optionally a level (default
/// [`NORMAL`](crate::level::NORMAL)). If the level is disabled, nothing is evaluated.
///
/// The report shows the values of the operands of the expression. For instance `kassert!(a == b)`
/// with `a = 1` and `b = 2` reports `1 == 2`. Expressions joined by `&&` or `||` get no operand
/// values, so they can keep short-circuiting.
///
/// This macro aborts whether or not exception mode is on.
#[macro_export]
macro_rules! kassert {
  ($expr:expr $(,)?) => {
    $crate::kassert!($expr, "", $crate::level::NORMAL)
  };
  ($expr:expr, $msg:expr $(,)?) => {
    $crate::kassert!($expr, $msg, $crate::level::NORMAL)
  };
  ($expr:expr, $msg:expr, $level:expr $(,)?) => {
    if const { $crate::level::enabled($level) } {
      if let ::core::option::Option::Some(mut report) = $crate::__private::decompose!(
        $crate,
        [
          ::std::io::stderr(),
          "ASSERTION",
          &$crate::source_location!(),
          ::core::stringify!($expr),
        ],
        $expr
      ) {
        report.message(&$msg);
        report.flush();
        ::std::process::abort();
      }
    }
  };
}

/// Asserts that an expression is true, else fails with a [`KassertError`](crate::KassertError).
///
/// In exception mode, returns `Err(From::from(err))` from the enclosing function, and is never
/// compiled out. Otherwise, prints the error and aborts, as a check at level
/// [`KTHROW`](crate::level::KTHROW).
#[macro_export]
macro_rules! throwing_kassert {
  ($expr:expr $(,)?) => {
    $crate::throwing_kassert!($expr, "")
  };
  ($expr:expr, $msg:expr $(,)?) => {
    $crate::__throwing_kassert_impl!(
      $expr,
      $crate::KassertError::new($crate::__private::build_what(
        ::core::stringify!($expr),
        &$crate::source_location!(),
        &$msg,
      ))
    )
  };
}

/// Like [`throwing_kassert!`], but fails with a custom error type.
///
/// `throwing_kassert_specified!(expr, msg, Type, args...)` makes the error with
/// `Type::new(what, args...)`, where `what` is the `String` a `KassertError` would have had.
#[macro_export]
macro_rules! throwing_kassert_specified {
  ($expr:expr, $msg:expr, $ty:ty $(, $arg:expr)*) => {
    $crate::__throwing_kassert_impl!(
      $expr,
      <$ty>::new(
        $crate::__private::build_what(
          ::core::stringify!($expr),
          &$crate::source_location!(),
          &$msg,
        )
        $(, $arg)*
      )
    )
  };
}

#[cfg(feature = "exception-mode")]
#[doc(hidden)]
#[macro_export]
macro_rules! __throwing_kassert_impl {
  ($expr:expr, $err:expr) => {
    if !$crate::Truth::truth(&($expr)) {
      return ::core::result::Result::Err(::core::convert::From::from($err));
    }
  };
}

#[cfg(not(feature = "exception-mode"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __throwing_kassert_impl {
  ($expr:expr, $err:expr) => {
    if const { $crate::level::enabled($crate::level::KTHROW) } {
      if !$crate::Truth::truth(&($expr)) {
        $crate::__private::print_error(&$err);
        ::std::process::abort();
      }
    }
  };
}
