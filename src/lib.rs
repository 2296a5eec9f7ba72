//! Validation and backtracking matching of simple grammars.
//!
//! ```
//! use simplegram::{Grammar, Matcher};
//!
//! let grammar: Grammar = "S -> aB | c\nB -> b".parse().unwrap();
//! let matcher = Matcher::new(grammar).unwrap();
//!
//! let tree = matcher.parse("ab").into_tree().unwrap();
//! assert_eq!(tree.to_string(), "S->aB[a, B->b[b]]");
//! assert!(!matcher.accepts("ac"));
//! ```

pub use backtrack::{
    match_start, MatchOutcome, Matcher, ParseNode, Span, State, TreeDisplay, DEFAULT_MAX_DEPTH,
};
pub use derive::SimpleGrammar;
pub use grammar::{validate, Error, Grammar, GrammarDefect, NonTerminal, Production, Rule, Symbol};
