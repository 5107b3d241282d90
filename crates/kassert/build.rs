//! Bakes the assertion level into the crate as `level::ASSERTION_LEVEL`.

use proc_macro2::Literal;
use quote::quote;
use std::env;
use std::path::Path;

const VAR: &str = "KASSERT_ASSERTION_LEVEL";

// keep in sync with `src/level.rs`
const KTHROW: i32 = 10;
const NORMAL: i32 = 30;

fn level() -> i32 {
  let s = match env::var(VAR) {
    Ok(s) => s,
    Err(env::VarError::NotPresent) => return NORMAL,
    Err(e) => panic!("{VAR}: {e}"),
  };
  match s.trim() {
    "kthrow" => KTHROW,
    "normal" => NORMAL,
    n => n.parse().unwrap_or_else(|e| panic!("{VAR}: not a level: `{n}`: {e}")),
  }
}

fn main() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-env-changed={VAR}");
  let level = level();
  let abs = Literal::u32_unsuffixed(level.unsigned_abs());
  let value = if level < 0 { quote! { -#abs } } else { quote! { #abs } };
  let doc = format!(" The assertion level, from `{VAR}` at build time. Checks above it are compiled out.");
  let token_stream = quote! {
    #[doc = #doc]
    pub const ASSERTION_LEVEL: i32 = #value;
  };
  let out_dir = env::var_os("OUT_DIR").expect("no OUT_DIR env var");
  let dst = Path::new(&out_dir).join("level.rs");
  let file = syn::parse2(token_stream).expect("syn parse failed");
  let formatted = prettyplease::unparse(&file);
  std::fs::write(dst, formatted).expect("io failed");
}
