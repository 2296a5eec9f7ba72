//! Grammars in "simple" form: single-letter non-terminals, single-character
//! terminals, and an ordered list of alternatives per non-terminal.

use std::fmt::{self, Display};
use std::str::FromStr;

mod error;
pub use error::Error;
mod parser;
mod validate;
pub use validate::{validate, GrammarDefect};

/// A non-terminal, named by a single uppercase letter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NonTerminal(pub char);

impl NonTerminal {
    /// The start symbol used when no other is given.
    pub const START: NonTerminal = NonTerminal('S');

    /// Create a non-terminal, checking that `name` is uppercase.
    pub fn new(name: char) -> Result<Self, Error> {
        if is_non_terminal(name) {
            Ok(NonTerminal(name))
        } else {
            Err(Error::InvalidNonTerminal(name))
        }
    }

    pub fn name(self) -> char {
        self.0
    }
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_non_terminal(ch: char) -> bool {
    ch.is_uppercase()
}

/// A single grammar symbol.
///
/// Classification is lexical: uppercase characters reference non-terminals,
/// everything else (digits and punctuation included) is a literal terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(NonTerminal),
}

impl Symbol {
    /// The character this symbol was written as.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Terminal(ch) => ch,
            Symbol::NonTerminal(nt) => nt.0,
        }
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        if is_non_terminal(ch) {
            Symbol::NonTerminal(NonTerminal(ch))
        } else {
            Symbol::Terminal(ch)
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A rule body. Symbols are classified once, when the body is built.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn first(&self) -> Option<Symbol> {
        self.symbols.first().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<&str> for Production {
    fn from(body: &str) -> Self {
        Production {
            symbols: body.chars().map(Symbol::from).collect(),
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for sym in &self.symbols {
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

/// A non-terminal and its alternatives, in trial order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule {
    pub lhs: NonTerminal,
    pub productions: Vec<Production>,
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for (i, production) in self.productions.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            write!(f, " {}", production)?;
        }
        Ok(())
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, rule) = parser::rule(s)?;
        Ok(rule)
    }
}

/// A set of rules, kept in the order non-terminals were first declared.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar { rules: Vec::new() }
    }

    /// Build a grammar from non-terminal names and their rule bodies.
    ///
    /// ```
    /// use grammar::Grammar;
    ///
    /// let g = Grammar::from_rules(vec![('S', vec!["aB", "c"]), ('B', vec!["b"])]).unwrap();
    /// assert_eq!(g.to_string(), "S -> aB | c\nB -> b\n");
    /// ```
    pub fn from_rules<'a, I, B>(rules: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (char, B)>,
        B: IntoIterator<Item = &'a str>,
    {
        let mut grammar = Grammar::new();
        for (name, bodies) in rules {
            let lhs = NonTerminal::new(name)?;
            grammar.declare(lhs);
            for body in bodies {
                grammar.push(lhs, Production::from(body));
            }
        }
        Ok(grammar)
    }

    /// Append a production to `lhs`, declaring `lhs` if it's new.
    pub fn push(&mut self, lhs: NonTerminal, production: Production) {
        self.declare(lhs).productions.push(production);
    }

    fn declare(&mut self, lhs: NonTerminal) -> &mut Rule {
        match self.rules.iter().position(|rule| rule.lhs == lhs) {
            Some(idx) => &mut self.rules[idx],
            None => {
                self.rules.push(Rule {
                    lhs,
                    productions: Vec::new(),
                });
                let last = self.rules.len() - 1;
                &mut self.rules[last]
            }
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Productions for `nt`, or `None` if `nt` was never declared.
    pub fn productions(&self, nt: NonTerminal) -> Option<&[Production]> {
        self.rules
            .iter()
            .find(|rule| rule.lhs == nt)
            .map(|rule| rule.productions.as_slice())
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = NonTerminal> + '_ {
        self.rules.iter().map(|rule| rule.lhs)
    }

    /// Number of declared non-terminals.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check that this grammar is simple. See [`validate`].
    pub fn validate(&self) -> Result<(), GrammarDefect> {
        validate(self)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rem, grammar) = parser::grammar(s)?;
        if !rem.is_empty() {
            return Err(Error::ParseError(format!("unexpected input: {:?}", rem)));
        }
        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_classified_by_case() {
        let p = Production::from("aB1+Ç");
        assert_eq!(
            p.symbols(),
            &[
                Symbol::Terminal('a'),
                Symbol::NonTerminal(NonTerminal('B')),
                Symbol::Terminal('1'),
                Symbol::Terminal('+'),
                Symbol::NonTerminal(NonTerminal('Ç')),
            ]
        );
        assert_eq!(p.to_string(), "aB1+Ç");
    }

    #[test]
    fn push_appends_to_existing_rule() {
        let mut g = Grammar::new();
        g.push(NonTerminal('S'), "aB".into());
        g.push(NonTerminal('B'), "b".into());
        g.push(NonTerminal('S'), "c".into());

        let names: Vec<_> = g.non_terminals().collect();
        assert_eq!(names, vec![NonTerminal('S'), NonTerminal('B')]);
        assert_eq!(
            g.productions(NonTerminal('S')).unwrap(),
            &[Production::from("aB"), Production::from("c")]
        );
        assert!(g.productions(NonTerminal('X')).is_none());
    }

    #[test]
    fn from_rules_rejects_lowercase_name() {
        let err = Grammar::from_rules(vec![('s', vec!["a"])]).unwrap_err();
        assert_eq!(err, Error::InvalidNonTerminal('s'));
    }

    #[test]
    fn lossless_grammar() {
        let g = Grammar::from_rules(vec![('S', vec!["aB", "c"]), ('B', vec!["b"])]).unwrap();
        let s = g.to_string();
        let parsed: Grammar = s.parse().unwrap();
        assert_eq!(g, parsed, "To string:\n{}\n", s);
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let err = "S -> a\n-> b".parse::<Grammar>().unwrap_err();
        assert!(matches!(err, Error::ParseError(_)), "got: {:?}", err);
    }
}
