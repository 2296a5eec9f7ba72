//! Proc macros for declaring simple grammars on a type.
//!
//! The grammar is parsed and validated while the macro expands, so a grammar
//! that isn't simple is a compile error rather than a runtime one.

use syn::{parse_macro_input, DeriveInput};

mod error;
mod generate;

/// Derive `grammar()`, `start()` and `matcher()` associated functions.
///
/// ```ignore
/// #[derive(SimpleGrammar)]
/// #[grammar_inline = "S -> aB | c; B -> b"]
/// struct Ab;
///
/// assert!(Ab::matcher().accepts("ab"));
/// ```
///
/// Use `#[grammar_file = "path"]` to read the grammar from a file relative to
/// the crate root instead, and `#[grammar_start = "X"]` to start from a
/// non-terminal other than `S`.
#[proc_macro_derive(SimpleGrammar, attributes(grammar_file, grammar_inline, grammar_start))]
pub fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    generate::generate(ast).into()
}
