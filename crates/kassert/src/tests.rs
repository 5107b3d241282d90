use crate::expr::{BitPick, ViaRefBitAnd as _, ViaRefBitXor as _, ViaValueBitAnd as _};
use crate::level;
use crate::render::{Pick, ViaDebug as _, ViaPlaceholder as _, ViaRender as _};
use crate::report::{build_what, strip_function_name};
use crate::{Expression as _, KassertError, Lhs, Logger, Operand, Render, RenderFn, SourceLocation};
use std::cell::Cell;
use std::fmt::Write as _;
use std::io::Write as _;

/// Checks the expression like `kassert!` does, but writes the report to a string instead of
/// stderr, and doesn't abort. Returns the empty string if the check passed.
macro_rules! report {
  ($expr:expr) => {{
    let mut sink = Vec::<u8>::new();
    let location = crate::source_location!();
    if let Some(report) = crate::__private::decompose!(
      crate,
      [&mut sink, "ASSERTION", &location, ::core::stringify!($expr)],
      $expr
    ) {
      report.flush();
    }
    String::from_utf8(sink).unwrap()
  }};
}

fn expansion(report: &str) -> Option<&str> {
  let (_, rest) = report.split_once("with expansion:\n\t")?;
  rest.lines().next()
}

#[track_caller]
fn check_fails(report: &str, want: &str) {
  assert!(report.contains("FAILED ASSERTION"), "no failure in {report:?}");
  assert_eq!(expansion(report), Some(want), "report: {report:?}");
}

fn op<T: Render + ?Sized>(x: &T) -> Operand<'_, T> {
  Operand::new(x, T::render)
}

fn render<T: Render + ?Sized>(x: &T) -> String {
  op(x).to_string()
}

fn show<T: ?Sized>(x: &T, render: RenderFn<T>) -> String {
  Operand::new(x, render).to_string()
}

fn show_op<T: std::fmt::Debug>(x: &T) -> Operand<'_, T> {
  Operand::new(x, (&&Pick::of(x)).renderer())
}

#[derive(PartialEq)]
struct Opaque(i32);

impl PartialEq<i32> for Opaque {
  fn eq(&self, other: &i32) -> bool {
    self.0 == *other
  }
}

#[derive(Debug)]
struct Debugged(i32);

/// Has `&` only by value, like a set of flags.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Flags(u8);

impl std::ops::BitAnd for Flags {
  type Output = Flags;
  fn bitand(self, rhs: Flags) -> Flags {
    Flags(self.0 & rhs.0)
  }
}

#[test]
fn render_scalars() {
  assert_eq!(render(&true), "true");
  assert_eq!(render(&'c'), "c");
  assert_eq!(render(&-3i64), "-3");
  assert_eq!(render(&1.5f64), "1.5");
  assert_eq!(render("hi"), "hi");
  assert_eq!(render(&String::from("hi")), "hi");
}

#[test]
fn render_sequences() {
  assert_eq!(render(&Vec::<i32>::new()), "[]");
  assert_eq!(render(&[1, 2, 3]), "[1, 2, 3]");
  assert_eq!(render(&vec![1, 2, 3][..]), "[1, 2, 3]");
  assert_eq!(render(&std::collections::VecDeque::from(vec![4, 5])), "[4, 5]");
}

#[test]
fn render_pairs() {
  assert_eq!(render(&(1, 2)), "(1, 2)");
  assert_eq!(render(&("a", false)), "(a, false)");
}

#[test]
fn render_nested() {
  let value = vec![(1, vec![2, 3]), (4, vec![])];
  assert_eq!(render(&value), "[(1, [2, 3]), (4, [])]");
  assert_eq!(render(&(vec![Some(1), None], Box::new(2))), "([Some(1), None], 2)");
}

#[test]
fn pick_prefers_render() {
  let s = String::from("a");
  assert_eq!(show(&s, (&&Pick::of(&s)).renderer()), "a");
}

#[test]
fn pick_falls_back_to_debug() {
  let d = Debugged(1);
  assert_eq!(show(&d, (&&Pick::of(&d)).renderer()), format!("Debugged({})", d.0));
}

#[test]
fn pick_falls_back_to_placeholder() {
  let o = Opaque(1);
  assert_eq!(show(&o, (&&Pick::of(&o)).renderer()), crate::PLACEHOLDER);
}

#[test]
fn binary_node() {
  let (a, b) = (1, 2);
  let node = Lhs::new(op(&a)).equal(op(&b));
  assert!(!node.result());
  assert!(!*node.value());
  assert_eq!(node.op(), crate::Op::Eq);
  assert_eq!(node.to_string(), "1 == 2");
  let node = Lhs::new(op(&a)).less(op(&b));
  assert!(node.result());
  assert_eq!(node.to_string(), "1 < 2");
}

#[test]
fn chained_node_uses_inner_value() {
  let (a, b, c) = (1, 1, false);
  let node = Lhs::new(op(&a)).equal(op(&b)).equal(op(&c));
  assert!(!node.result());
  assert_eq!(node.to_string(), "1 == 1 == false");
}

#[test]
fn bitwise_node() {
  let (a, b) = (6u8, 3u8);
  let node = Lhs::new(op(&a)).bit_and(op(&b), (&&BitPick::of(&a, &b)).bit_and());
  assert!(node.result());
  assert_eq!(*node.value(), 2);
  assert_eq!(node.to_string(), "6 & 3");
  let node = Lhs::new(op(&a)).bit_xor(op(&a), (&&BitPick::of(&a, &a)).bit_xor());
  assert!(!node.result());
  assert_eq!(node.to_string(), "6 ^ 6");
}

#[test]
fn bitwise_node_by_value() {
  let (f, a) = (Flags(6), Flags(2));
  let node = Lhs::new(show_op(&f)).bit_and(show_op(&a), (&&BitPick::of(&f, &a)).bit_and());
  assert_eq!(*node.value(), Flags(2));
  let node = node.equal(show_op(&a));
  assert!(node.result());
  assert_eq!(node.to_string(), "Flags(6) & Flags(2) == Flags(2)");
}

#[test]
fn unary_node() {
  let zero = 0i32;
  assert!(!crate::Unary::new(op(&zero)).result());
  assert!(crate::Unary::new(op(&true)).result());
  assert_eq!(crate::Unary::new(op(&zero)).to_string(), "0");
}

#[test]
fn passing_reports_nothing() {
  let (x, y): (i32, i32) = (3, 3);
  assert_eq!(report!(x == y), "");
  assert_eq!(report!(x <= y), "");
  assert_eq!(report!(x & y), "");
  assert_eq!(report!(x != 4), "");
}

#[test]
fn relations() {
  let (x, y): (i32, i32) = (3, 4);
  check_fails(&report!(x == y), "3 == 4");
  check_fails(&report!(y != y), "4 != 4");
  check_fails(&report!(y < x), "4 < 3");
  check_fails(&report!(y <= x), "4 <= 3");
  check_fails(&report!(x > y), "3 > 4");
  check_fails(&report!(x >= y), "3 >= 4");
}

#[test]
fn bitwise() {
  let (x, y, z): (i32, i32, i32) = (6, 1, 0);
  check_fails(&report!(x & y), "6 & 1");
  check_fails(&report!(z | z), "0 | 0");
  check_fails(&report!(x ^ x), "6 ^ 6");
  check_fails(&report!(x & 3 & z), "6 & 3 & 0");
}

#[test]
fn bitwise_by_value() {
  let (f, a, b) = (Flags(6), Flags(2), Flags(1));
  assert_eq!(report!((f & a) == a), "");
  check_fails(&report!((f & b) == b), "Flags(6) & Flags(1) == Flags(1)");
  check_fails(&report!(((f & a) & b) == b), "Flags(6) & Flags(2) & Flags(1) == Flags(1)");
  check_fails(&report!((f & b) != Flags(0)), "Flags(6) & Flags(1) != Flags(0)");
}

#[test]
fn literals() {
  check_fails(&report!(1 == 2), "1 == 2");
  check_fails(&report!(2 < 1), "2 < 1");
  check_fails(&report!(6 & 1), "6 & 1");
  check_fails(&report!(0), "0");
  assert_eq!(report!(6 & 3), "");
  assert_eq!(report!("a" == "a"), "");
  crate::kassert!(1 == 1);
  crate::kassert!(true && 1 == 1);
  crate::kassert!(2 > 1, "two is more");
}

#[test]
fn unary() {
  let flag = false;
  check_fails(&report!(flag), "false");
  let zero = 0u32;
  check_fails(&report!(zero), "0");
  let v = vec![1];
  check_fails(&report!(v.is_empty()), "false");
}

#[test]
fn chain_through_parens() {
  let (x, y, z): (i32, i32, bool) = (1, 1, false);
  check_fails(&report!((x == y) == z), "1 == 1 == false");
}

#[test]
fn right_operand_opaque() {
  let (b, x, y): (bool, i32, i32) = (false, 1, 1);
  check_fails(&report!(b == (x == y)), "false == true");
  let (x, y, z): (i32, i32, i32) = (1, 6, 3);
  check_fails(&report!(x == y & z), "1 == 2");
}

#[test]
fn strings() {
  let s = String::from("a");
  check_fails(&report!(s == "b"), "a == b");
}

#[test]
fn sequences() {
  let (a, b) = (Vec::<i32>::new(), vec![0]);
  check_fails(&report!(a == b), "[] == [0]");
  let (p, q) = ((1, 2), (1, 3));
  check_fails(&report!(p == q), "(1, 2) == (1, 3)");
}

#[test]
fn placeholder() {
  let (a, b) = (Opaque(1), Opaque(2));
  check_fails(&report!(a == b), "<?> == <?>");
  check_fails(&report!(a == 42), "<?> == 42");
  assert_eq!(report!(a == 1), "");
}

#[test]
fn logical_has_no_expansion() {
  let (t, f) = (true, false);
  let report = report!(t && f);
  assert!(report.contains("FAILED ASSERTION\n\tt && f\n"), "report: {report:?}");
  assert_eq!(expansion(&report), None);
  assert_eq!(report!(t || f), "");
}

#[test]
fn short_circuit() {
  let calls = Cell::new(0);
  let f = |x: bool| {
    calls.set(calls.get() + 1);
    x
  };
  let _ = report!(false && f(true));
  assert_eq!(calls.get(), 0);
  let _ = report!(true || f(false));
  assert_eq!(calls.get(), 0);
  let _ = report!(true && f(true));
  assert_eq!(calls.get(), 1);
  let _ = report!(false || f(false));
  assert_eq!(calls.get(), 2);
}

#[test]
fn operands_evaluated_once() {
  let count = Cell::new(0i32);
  let next = || {
    count.set(count.get() + 1);
    count.get()
  };
  assert_eq!(report!(next() == 1), "");
  assert_eq!(count.get(), 1);
  check_fails(&report!(next() == 0), "2 == 0");
  assert_eq!(count.get(), 2);
  check_fails(&report!((next() < next()) == false), "3 < 4 == false");
  assert_eq!(count.get(), 4);
}

#[test]
fn report_format() {
  let mut sink = Vec::new();
  let location = SourceLocation { file: "a.rs", line: 7, function: "m::g" };
  let (x, y): (i32, i32) = (3, 4);
  let mut report =
    crate::__private::decompose!(crate, [&mut sink, "ASSERTION", &location, "x == y"], x == y)
      .unwrap();
  report.message(&format_args!("x is {x}"));
  report.flush();
  assert_eq!(
    String::from_utf8(sink).unwrap(),
    "a.rs: In function 'm::g':\na.rs:7: FAILED ASSERTION\n\tx == y\nwith expansion:\n\t3 == 4\nx is 3\n"
  );
}

#[test]
fn report_empty_message() {
  let mut sink = Vec::new();
  let location = SourceLocation { file: "a.rs", line: 1, function: "m" };
  let flag = false;
  let mut report =
    crate::__private::decompose!(crate, [&mut sink, "ASSERTION", &location, "flag"], flag)
      .unwrap();
  report.message(&"");
  assert_eq!(report.buffered(), "a.rs: In function 'm':\na.rs:1: FAILED ASSERTION\n\tflag\nwith expansion:\n\tfalse\n");
}

#[test]
fn report_stream() {
  let mut sink = Vec::new();
  let location = SourceLocation { file: "a.rs", line: 2, function: "m" };
  let (x, y): (i32, i32) = (1, 2);
  let mut report =
    crate::__private::decompose!(crate, [&mut sink, "ASSERTION", &location, "x == y",], x == y,)
      .unwrap();
  report.message(&"differ");
  report.stream().write_all(b"more\n").unwrap();
  assert_eq!(report.buffered(), "");
  report.message(&"after");
  report.flush();
  assert_eq!(
    String::from_utf8(sink).unwrap(),
    "a.rs: In function 'm':\na.rs:2: FAILED ASSERTION\n\tx == y\nwith expansion:\n\t1 == 2\ndiffer\nmore\nafter\n"
  );
}

#[test]
fn what() {
  let location = SourceLocation { file: "a.rs", line: 3, function: "m::f" };
  assert_eq!(
    build_what("x", &location, &"msg"),
    "\na.rs: In function 'm::f':\na.rs: 3: FAILED ASSERTION\n\tx\nmsg\n"
  );
  let err = KassertError::new(build_what("x", &location, &""));
  assert_eq!(err.to_string(), err.what());
}

#[test]
fn function_name() {
  assert_eq!(crate::function_name!(), "kassert::tests::function_name");
  let in_closure = || crate::function_name!();
  assert_eq!(in_closure(), "kassert::tests::function_name");
}

#[test]
fn strip_function() {
  assert_eq!(strip_function_name("a::b::f"), "a::b");
  assert_eq!(strip_function_name("a::b::{{closure}}::{{closure}}::f"), "a::b");
  assert_eq!(strip_function_name("a::b"), "a::b");
}

#[test]
fn source_location() {
  let location = crate::source_location!();
  assert_eq!(location.file, file!());
  assert_eq!(location.line, line!() - 2);
  assert_eq!(location.function, "kassert::tests::source_location");
}

#[test]
fn logger_buffers() {
  let mut out = Vec::new();
  {
    let mut logger = Logger::new(&mut out);
    write!(logger, "a{}", 1).unwrap();
    assert_eq!(logger.buffered(), "a1");
    logger.stream().write_all(b"b").unwrap();
    assert_eq!(logger.buffered(), "");
    write!(logger, "c").unwrap();
  }
  assert_eq!(out, b"a1bc");
}

#[test]
fn levels() {
  assert!(level::enabled(level::ASSERTION_LEVEL));
  assert!(!level::enabled(level::ASSERTION_LEVEL + 1));
  assert_eq!(crate::kassert_enabled!(level::NORMAL), level::NORMAL <= level::ASSERTION_LEVEL);
  assert_eq!(crate::kassert_enabled!(level::KTHROW), level::KTHROW <= level::ASSERTION_LEVEL);
}

#[test]
fn disabled_level_evaluates_nothing() {
  let calls = Cell::new(0);
  let touch = || {
    calls.set(calls.get() + 1);
    false
  };
  crate::kassert!(touch(), "never checked", level::ASSERTION_LEVEL + 1);
  assert_eq!(calls.get(), 0);
}

#[test]
fn enabled_level_evaluates_once() {
  let calls = Cell::new(0);
  let touch = || {
    calls.set(calls.get() + 1);
    true
  };
  crate::kassert!(touch(), "", level::ASSERTION_LEVEL);
  assert_eq!(calls.get(), 1);
  crate::kassert!(touch() && touch());
  assert_eq!(calls.get(), if crate::kassert_enabled!(level::NORMAL) { 3 } else { 1 });
}

fn positive(x: i32) -> Result<i32, KassertError> {
  crate::throwing_kassert!(x > 0, format_args!("{x} is not positive"));
  Ok(x)
}

#[test]
fn throwing_passes() {
  assert_eq!(positive(1), Ok(1));
}

#[cfg(feature = "exception-mode")]
#[test]
fn throwing_fails() {
  let err = positive(-2).unwrap_err();
  assert!(err.what().contains("FAILED ASSERTION\n\tx > 0\n-2 is not positive\n"), "{err}");
  assert!(err.what().contains("In function 'kassert::tests::positive'"), "{err}");
}

#[test]
fn exception_mode_flag() {
  assert_eq!(crate::EXCEPTION_MODE, cfg!(feature = "exception-mode"));
}
