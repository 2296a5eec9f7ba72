//! Backtracking recognition of simple grammars.
//!
//! Productions are tried in declared order. A production that fails part way
//! rewinds the cursor before the next one is tried; there is no lookahead and
//! no memoization.

use grammar::{Grammar, GrammarDefect, NonTerminal};

mod position;
mod span;
mod state;
mod tree;

pub use position::Position;
pub use span::Span;
pub use state::{match_start, State, DEFAULT_MAX_DEPTH};
pub use tree::{ParseNode, TreeDisplay};

/// Result of matching one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Accepted { tree: ParseNode },
    Rejected,
}

impl MatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MatchOutcome::Accepted { .. })
    }

    pub fn tree(&self) -> Option<&ParseNode> {
        match self {
            MatchOutcome::Accepted { tree } => Some(tree),
            MatchOutcome::Rejected => None,
        }
    }

    pub fn into_tree(self) -> Option<ParseNode> {
        match self {
            MatchOutcome::Accepted { tree } => Some(tree),
            MatchOutcome::Rejected => None,
        }
    }
}

impl From<Option<ParseNode>> for MatchOutcome {
    fn from(tree: Option<ParseNode>) -> Self {
        match tree {
            Some(tree) => MatchOutcome::Accepted { tree },
            None => MatchOutcome::Rejected,
        }
    }
}

/// A validated grammar and its start symbol, reusable across inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    grammar: Grammar,
    start: NonTerminal,
    max_depth: usize,
}

impl Matcher {
    /// Validate `grammar` and match from [`NonTerminal::START`].
    pub fn new(grammar: Grammar) -> Result<Self, GrammarDefect> {
        Self::with_start(grammar, NonTerminal::START)
    }

    /// Validate `grammar` and match from `start`. A start symbol the grammar
    /// doesn't declare rejects every input.
    pub fn with_start(grammar: Grammar, start: NonTerminal) -> Result<Self, GrammarDefect> {
        grammar.validate()?;
        Ok(Self::from_validated(grammar, start))
    }

    /// Skip validation. Matching still terminates on grammars that aren't
    /// simple, but alternatives sharing a leading symbol are no longer
    /// guaranteed to be explored usefully.
    pub fn from_validated(grammar: Grammar, start: NonTerminal) -> Self {
        Matcher {
            grammar,
            start,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Inputs whose derivation nests deeper than `max_depth` non-terminals
    /// are rejected. Raising it past [`DEFAULT_MAX_DEPTH`] needs a larger
    /// thread stack to go with it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn parse(&self, input: &str) -> MatchOutcome {
        let state = State::new(&self.grammar, input).with_max_depth(self.max_depth);
        state::match_all(state, self.start).into()
    }

    pub fn accepts(&self, input: &str) -> bool {
        self.parse(input).is_accepted()
    }
}
