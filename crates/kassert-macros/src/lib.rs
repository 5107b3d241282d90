//! The procedural half of `kassert`.
//!
//! Not meant to be used directly. The `kassert` macros forward here with the path to the runtime
//! crate, the leading arguments for its evaluator, and the asserted expression.


mod expand;

/// Evaluates an assertion expression exactly once, capturing its operands for the report.
///
/// Input is `krate, [args...], expr`. The output calls `krate::__private::evaluate(args..., &e)`,
/// where `e` is one of:
///
/// - the expression itself, as a plain `bool`, if its top-level operator is `&&` or `||`
/// - a `Binary` built left to right from the supported operators on the left spine
/// - a `Unary` wrapping the whole expression otherwise
#[proc_macro]
pub fn decompose(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
  let input = syn::parse_macro_input!(input as expand::Input);
  expand::go(&input).into()
}
