use std::collections::HashSet;
use std::error;
use std::fmt::{self, Display};

use crate::{Grammar, NonTerminal, Symbol};

/// A structural property that keeps a grammar from being simple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarDefect {
    /// A production starts with the non-terminal it defines.
    LeftRecursion { non_terminal: NonTerminal },
    /// A production with no symbols.
    EmptyProduction { non_terminal: NonTerminal },
    /// Two productions of one non-terminal start with the same symbol.
    DuplicateLeadingSymbol { non_terminal: NonTerminal },
}

impl GrammarDefect {
    pub fn non_terminal(&self) -> NonTerminal {
        match *self {
            GrammarDefect::LeftRecursion { non_terminal }
            | GrammarDefect::EmptyProduction { non_terminal }
            | GrammarDefect::DuplicateLeadingSymbol { non_terminal } => non_terminal,
        }
    }
}

impl Display for GrammarDefect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GrammarDefect::LeftRecursion { non_terminal } => {
                write!(f, "grammar isn't simple: left recursion in '{}'", non_terminal)
            }
            GrammarDefect::EmptyProduction { non_terminal } => {
                write!(f, "grammar isn't simple: empty rule found in '{}'", non_terminal)
            }
            GrammarDefect::DuplicateLeadingSymbol { non_terminal } => write!(
                f,
                "grammar isn't simple: duplicate starting symbols in '{}'",
                non_terminal
            ),
        }
    }
}

impl error::Error for GrammarDefect {}

/// Check that `grammar` is simple, returning the first defect found.
///
/// Non-terminals are visited in declaration order. For each one, every
/// production is checked for left recursion and then emptiness, after which
/// the leading symbols of all its productions are checked for duplicates.
///
/// Only direct left recursion is detected. `S -> Ba` with `B -> Sb` passes.
/// References to undeclared non-terminals are not checked.
pub fn validate(grammar: &Grammar) -> Result<(), GrammarDefect> {
    for rule in grammar.rules() {
        let non_terminal = rule.lhs;

        for production in &rule.productions {
            if production.first() == Some(Symbol::NonTerminal(non_terminal)) {
                return Err(GrammarDefect::LeftRecursion { non_terminal });
            }
            if production.is_empty() {
                return Err(GrammarDefect::EmptyProduction { non_terminal });
            }
        }

        let mut seen = HashSet::new();
        let duplicate = rule
            .productions
            .iter()
            .filter_map(|production| production.first())
            .any(|first| !seen.insert(first));
        if duplicate {
            return Err(GrammarDefect::DuplicateLeadingSymbol { non_terminal });
        }
    }
    Ok(())
}
