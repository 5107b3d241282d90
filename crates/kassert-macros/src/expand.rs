//! Splitting an assertion expression and generating the capture chain.

use proc_macro2::{Ident, Span, TokenStream, TokenTree};
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{BinOp, Expr, Token};

pub(crate) struct Input {
  krate: TokenTree,
  args: Vec<Expr>,
  expr: Expr,
}

impl Parse for Input {
  fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
    // `$crate` arrives as a single ident, so don't parse it as a path.
    let krate: TokenTree = input.parse()?;
    input.parse::<Token![,]>()?;
    let content;
    syn::bracketed!(content in input);
    let args = Punctuated::<Expr, Token![,]>::parse_terminated(&content)?.into_iter().collect();
    input.parse::<Token![,]>()?;
    let expr: Expr = input.parse()?;
    input.parse::<Option<Token![,]>>()?;
    Ok(Self { krate, args, expr })
  }
}

/// An operator the runtime knows how to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
  Eq,
  Ne,
  Lt,
  Le,
  Gt,
  Ge,
  BitAnd,
  BitOr,
  BitXor,
}

impl Op {
  fn of(op: &BinOp) -> Option<Self> {
    let ret = match op {
      BinOp::Eq(_) => Self::Eq,
      BinOp::Ne(_) => Self::Ne,
      BinOp::Lt(_) => Self::Lt,
      BinOp::Le(_) => Self::Le,
      BinOp::Gt(_) => Self::Gt,
      BinOp::Ge(_) => Self::Ge,
      BinOp::BitAnd(_) => Self::BitAnd,
      BinOp::BitOr(_) => Self::BitOr,
      BinOp::BitXor(_) => Self::BitXor,
      _ => return None,
    };
    Some(ret)
  }

  /// Whether this is `&`, `|` or `^`.
  pub(crate) fn is_bitwise(self) -> bool {
    matches!(self, Self::BitAnd | Self::BitOr | Self::BitXor)
  }

  /// The method on `Lhs` and `Binary` that applies this.
  pub(crate) fn method(self) -> &'static str {
    match self {
      Self::Eq => "equal",
      Self::Ne => "not_equal",
      Self::Lt => "less",
      Self::Le => "less_equal",
      Self::Gt => "greater",
      Self::Ge => "greater_equal",
      Self::BitAnd => "bit_and",
      Self::BitOr => "bit_or",
      Self::BitXor => "bit_xor",
    }
  }
}

/// How an assertion expression gets checked.
pub(crate) enum Shape<'a> {
  /// As a plain `bool`. Used for `&&` and `||`, which must keep short-circuiting.
  Plain(&'a Expr),
  /// As a single operand with a truth value.
  Unary(&'a Expr),
  /// The leftmost operand, then each operator with its right operand, in evaluation order.
  Binary(&'a Expr, Vec<(Op, &'a Expr)>),
}

pub(crate) fn split(expr: &Expr) -> Shape<'_> {
  let expr = strip(expr);
  match expr {
    Expr::Binary(bin) if matches!(bin.op, BinOp::And(_) | BinOp::Or(_)) => Shape::Plain(expr),
    Expr::Binary(bin) if Op::of(&bin.op).is_some() => {
      let mut links = Vec::new();
      let leftmost = spine(expr, &mut links);
      Shape::Binary(leftmost, links)
    }
    _ => Shape::Unary(expr),
  }
}

/// Walks down the left operands while they are supported operators. Parentheses don't stop the
/// walk: `(a == b) == c` is how Rust spells a chain.
fn spine<'a>(expr: &'a Expr, links: &mut Vec<(Op, &'a Expr)>) -> &'a Expr {
  let expr = strip(expr);
  if let Expr::Binary(bin) = expr {
    if let Some(op) = Op::of(&bin.op) {
      let leftmost = spine(&bin.left, links);
      links.push((op, &bin.right));
      return leftmost;
    }
  }
  expr
}

/// Removes parentheses, and the invisible groups left by `$e:expr` fragments.
fn strip(mut expr: &Expr) -> &Expr {
  loop {
    expr = match expr {
      Expr::Paren(e) => &e.expr,
      Expr::Group(e) => &e.expr,
      _ => return expr,
    };
  }
}

pub(crate) fn go(input: &Input) -> TokenStream {
  let Input { krate, args, expr } = input;
  let private = quote! { #krate::__private };
  let (operands, node) = match split(expr) {
    Shape::Plain(e) => return quote! { #private::evaluate(#(#args,)* &(#e)) },
    Shape::Unary(e) => {
      let operand = operand(&private, &binding(0));
      (vec![e], quote! { #private::Unary::new(#operand) })
    }
    Shape::Binary(leftmost, links) => {
      let first = operand(&private, &binding(0));
      let mut node = quote! { #private::Lhs::new(#first) };
      let mut operands = vec![leftmost];
      for (idx, (op, rhs)) in links.into_iter().enumerate() {
        let method = format_ident!("{}", op.method());
        let rhs_name = binding(idx + 1);
        let operand = operand(&private, &rhs_name);
        node = if idx == 0 && op.is_bitwise() {
          // both operands are still bindings here, so the way to apply the operator can be picked
          // from their types.
          let lhs_name = binding(0);
          let apply = quote! { (&&#private::BitPick::of(#lhs_name, #rhs_name)).#method() };
          quote! { #node.#method(#operand, #apply) }
        } else {
          quote! { #node.#method(#operand) }
        };
        operands.push(rhs);
      }
      (operands, node)
    }
  };
  let names = (0..operands.len()).map(binding);
  // all operands are evaluated here, once, left to right. the chain only sees the bindings.
  quote! {{
    #[allow(unused_imports)]
    use #private::{
      ViaDebug as _, ViaPlaceholder as _, ViaRefBitAnd as _, ViaRefBitOr as _, ViaRefBitXor as _,
      ViaRender as _, ViaValueBitAnd as _, ViaValueBitOr as _, ViaValueBitXor as _,
    };
    match (#(&(#operands),)*) {
      (#(#names,)*) => #private::evaluate(#(#args,)* &#node),
    }
  }}
}

fn binding(idx: usize) -> Ident {
  format_ident!("__kassert_operand_{}", idx, span = Span::mixed_site())
}

fn operand(private: &TokenStream, name: &Ident) -> TokenStream {
  quote! { #private::Operand::new(#name, (&&#private::Pick::of(#name)).renderer()) }
}
