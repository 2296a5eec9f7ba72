use proc_macro2::TokenStream;
use quote::quote;
use std::env;
use std::fs;
use std::path::Path;
use syn::{DeriveInput, Generics, Ident, Lit, Meta, MetaNameValue};

use grammar::{Grammar, NonTerminal};

use crate::error::{DeriveError, Result};

const GRAMMAR_FILE_ATTR: &str = "grammar_file";
const GRAMMAR_INLINE_ATTR: &str = "grammar_inline";
const GRAMMAR_START_ATTR: &str = "grammar_start";

/// Expand the derive, turning any failure into a `compile_error!` pointing at
/// the type.
pub fn generate(ast: DeriveInput) -> TokenStream {
    match try_generate(&ast) {
        Ok(ts) => ts,
        Err(e) => syn::Error::new_spanned(&ast.ident, e.to_string()).to_compile_error(),
    }
}

fn try_generate(ast: &DeriveInput) -> Result<TokenStream> {
    let grammar = grammar_from_ast(ast)?;
    let start = start_from_ast(ast)?;
    grammar.validate()?;
    Ok(generate_impl(&ast.ident, &ast.generics, &grammar, start))
}

/// Name-value attributes whose name is one of `names`.
fn name_value_attrs(ast: &DeriveInput, names: &[&str]) -> Vec<MetaNameValue> {
    ast.attrs
        .iter()
        .filter_map(|attr| match attr.parse_meta() {
            Ok(Meta::NameValue(val)) if names.iter().any(|name| val.path.is_ident(name)) => {
                Some(val)
            }
            _ => None,
        })
        .collect()
}

fn lit_str(val: &MetaNameValue) -> Result<String> {
    match val.lit {
        Lit::Str(ref s) => Ok(s.value()),
        _ => Err(DeriveError::Other("attribute not a string".to_owned())),
    }
}

/// Load a grammar from a derive attribute.
///
/// There must be exactly 1 attribute specifying the grammar source. The source
/// may either be written inline, or a path to a grammar file relative to
/// `CARGO_MANIFEST_DIR`.
fn grammar_from_ast(ast: &DeriveInput) -> Result<Grammar> {
    let mut sources = name_value_attrs(ast, &[GRAMMAR_FILE_ATTR, GRAMMAR_INLINE_ATTR]);

    let source = match sources.len() {
        0 => return Err(DeriveError::MissingGrammarSource),
        1 => sources.remove(0),
        _ => return Err(DeriveError::MultipleGrammarSources),
    };

    let value = lit_str(&source)?;
    let text = if source.path.is_ident(GRAMMAR_FILE_ATTR) {
        let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
        let path = Path::new(&root).join(&value);
        fs::read_to_string(&path).map_err(|e| {
            DeriveError::Other(format!(
                "read grammar file: {}, {}",
                path.to_string_lossy(),
                e
            ))
        })?
    } else {
        value
    };

    Ok(text.parse()?)
}

/// The start symbol, `S` unless given with `grammar_start`.
fn start_from_ast(ast: &DeriveInput) -> Result<NonTerminal> {
    let attrs = name_value_attrs(ast, &[GRAMMAR_START_ATTR]);
    let val = match attrs.first() {
        Some(val) => val,
        None => return Ok(NonTerminal::START),
    };

    let value = lit_str(val)?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => NonTerminal::new(ch).map_err(|_| DeriveError::InvalidStart(value)),
        _ => Err(DeriveError::InvalidStart(value)),
    }
}

/// Generate the associated functions. The grammar is rebuilt from its
/// productions, no parsing happens at runtime.
fn generate_impl(
    name: &Ident,
    generics: &Generics,
    grammar: &Grammar,
    start: NonTerminal,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let gen_rules = generate_rules(grammar);
    let start = start.name();

    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn grammar() -> ::grammar::Grammar {
                let mut rules = ::grammar::Grammar::new();
                #( #gen_rules )*
                rules
            }

            pub fn start() -> ::grammar::NonTerminal {
                ::grammar::NonTerminal(#start)
            }

            pub fn matcher() -> ::backtrack::Matcher {
                ::backtrack::Matcher::from_validated(Self::grammar(), Self::start())
            }
        }
    }
}

/// One `push` per production, in declared order.
fn generate_rules(grammar: &Grammar) -> Vec<TokenStream> {
    grammar
        .rules()
        .iter()
        .flat_map(|rule| {
            let lhs = rule.lhs.name();
            rule.productions.iter().map(move |production| {
                let body = production.to_string();
                quote! {
                    rules.push(::grammar::NonTerminal(#lhs), ::grammar::Production::from(#body));
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar::GrammarDefect;
    use syn::parse_str;

    #[test]
    fn generate_print() {
        let def = "
            #[derive(SimpleGrammar)]
            #[grammar_inline = \"S -> aB | c; B -> b\"]
            struct Dummy;
         ";
        let ast: DeriveInput = parse_str(def).unwrap();
        let ts = generate(ast);
        println!("Generated:\n{}", ts.to_string());
        assert!(ts.to_string().contains("fn matcher"));
    }

    #[test]
    fn load_simple_inline_grammar() {
        let def = "
            #[grammar_inline = \"S -> aB | c; B -> b\"]
            struct Dummy;
        ";
        let ast = parse_str(def).unwrap();
        let got = grammar_from_ast(&ast).unwrap();
        let expected = Grammar::from_rules(vec![('S', vec!["aB", "c"]), ('B', vec!["b"])]).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn missing_grammar_source() {
        let def = "
            struct Dummy;
        ";
        let ast = parse_str(def).unwrap();
        let err = grammar_from_ast(&ast).unwrap_err();
        assert_eq!(err, DeriveError::MissingGrammarSource);
    }

    #[test]
    fn multiple_grammar_sources() {
        let def = "
            #[grammar_inline = \"S -> a\"]
            #[grammar_file = \"simple.grammar\"]
            struct Dummy;
        ";
        let ast = parse_str(def).unwrap();
        let err = grammar_from_ast(&ast).unwrap_err();
        assert_eq!(err, DeriveError::MultipleGrammarSources);
    }

    #[test]
    fn defect_is_an_error() {
        let def = "
            #[grammar_inline = \"S -> Sa | b\"]
            struct Dummy;
        ";
        let ast = parse_str(def).unwrap();
        let err = try_generate(&ast).unwrap_err();
        assert_eq!(
            err,
            DeriveError::Defect(GrammarDefect::LeftRecursion {
                non_terminal: NonTerminal('S')
            })
        );

        let ts = generate(ast);
        assert!(ts.to_string().contains("compile_error"), "got: {}", ts);
    }

    #[test]
    fn start_symbol() {
        let tests = vec![
            ("struct Dummy;", Ok(NonTerminal('S'))),
            ("#[grammar_start = \"B\"] struct Dummy;", Ok(NonTerminal('B'))),
            (
                "#[grammar_start = \"b\"] struct Dummy;",
                Err(DeriveError::InvalidStart("b".to_owned())),
            ),
            (
                "#[grammar_start = \"SB\"] struct Dummy;",
                Err(DeriveError::InvalidStart("SB".to_owned())),
            ),
        ];
        for (def, expected) in tests {
            let ast = parse_str(def).unwrap();
            assert_eq!(start_from_ast(&ast), expected, "def: {}", def);
        }
    }

    #[test]
    fn simple_rules() {
        let g: Grammar = "S -> aB | c; B -> b".parse().unwrap();
        let expected = vec![
            quote! { rules.push(::grammar::NonTerminal('S'), ::grammar::Production::from("aB")); },
            quote! { rules.push(::grammar::NonTerminal('S'), ::grammar::Production::from("c")); },
            quote! { rules.push(::grammar::NonTerminal('B'), ::grammar::Production::from("b")); },
        ];
        let got: Vec<String> = generate_rules(&g).iter().map(|ts| ts.to_string()).collect();
        let expected: Vec<String> = expected.iter().map(|ts| ts.to_string()).collect();
        assert_eq!(got, expected);
    }
}
