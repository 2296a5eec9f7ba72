use std::collections::HashSet;

use grammar::{Grammar, NonTerminal, Production, Symbol};

use crate::position::Position;
use crate::span::Span;
use crate::tree::ParseNode;

/// Nesting limit used unless a caller picks another one. Each level costs a
/// few native stack frames, so this stays well inside a default thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Matcher state for a single attempt over a single input.
///
/// The grammar is only borrowed. The cursor and the stack of active
/// non-terminals are the only mutable parts, and nothing outlives the attempt.
#[derive(Debug)]
pub struct State<'g, 'a> {
    grammar: &'g Grammar,
    cursor: Position<'a>,
    /// (non-terminal, byte offset) pairs currently being matched.
    active: HashSet<(NonTerminal, usize)>,
    depth: usize,
    max_depth: usize,
}

impl<'g, 'a> State<'g, 'a> {
    /// State with the cursor at the start of `input`.
    pub fn new(grammar: &'g Grammar, input: &'a str) -> Self {
        Self::with_cursor(grammar, Position::start(input))
    }

    /// State with the cursor at byte offset `start` of `input`.
    pub fn at(grammar: &'g Grammar, input: &'a str, start: usize) -> Result<Self, anyhow::Error> {
        Ok(Self::with_cursor(grammar, Position::new(input, start)?))
    }

    fn with_cursor(grammar: &'g Grammar, cursor: Position<'a>) -> Self {
        State {
            grammar,
            cursor,
            active: HashSet::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the nesting limit. Anything nested deeper fails to match.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.cursor.idx
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Try each production of `nt` in declared order, restoring the cursor
    /// after every failed attempt.
    ///
    /// Undeclared non-terminals never match. Neither does `nt` while it is
    /// already being matched at the same position, which cuts off indirect
    /// left recursion, nor anything nested deeper than the depth limit.
    pub fn match_nonterminal(&mut self, nt: NonTerminal) -> Option<ParseNode> {
        let grammar = self.grammar;
        let productions = grammar.productions(nt)?;
        if self.depth >= self.max_depth {
            return None;
        }
        let key = (nt, self.cursor.idx);
        if !self.active.insert(key) {
            return None;
        }

        self.depth += 1;
        let start = self.cursor.clone();
        let mut matched = None;
        for (alternative, production) in productions.iter().enumerate() {
            if let Some(children) = self.match_body(production) {
                matched = Some(ParseNode::Node {
                    name: nt,
                    alternative,
                    production: production.clone(),
                    children,
                    span: Span::new(start.idx, self.cursor.idx),
                });
                break;
            }
            self.cursor = start.clone();
        }
        self.depth -= 1;
        self.active.remove(&key);

        matched
    }

    /// Match the symbols of `production` left to right, stopping at the first
    /// one that fails. The cursor is not restored on failure.
    pub fn match_body(&mut self, production: &Production) -> Option<Vec<ParseNode>> {
        let mut children = Vec::with_capacity(production.len());
        for symbol in production.symbols() {
            let child = match *symbol {
                Symbol::NonTerminal(nt) => self.match_nonterminal(nt)?,
                Symbol::Terminal(ch) => {
                    if !self.cursor.match_char(ch) {
                        return None;
                    }
                    ParseNode::Leaf(ch)
                }
            };
            children.push(child);
        }
        Some(children)
    }
}

/// Derive all of `input` from `start`, nesting at most [`DEFAULT_MAX_DEPTH`]
/// levels.
///
/// A derivation that leaves input unconsumed is a rejection.
pub fn match_start(grammar: &Grammar, start: NonTerminal, input: &str) -> Option<ParseNode> {
    match_all(State::new(grammar, input), start)
}

pub(crate) fn match_all(mut state: State, start: NonTerminal) -> Option<ParseNode> {
    let tree = state.match_nonterminal(start)?;
    if state.is_at_end() {
        Some(tree)
    } else {
        None
    }
}
