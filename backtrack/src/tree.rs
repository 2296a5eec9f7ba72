use std::fmt::{self, Display};

use grammar::{NonTerminal, Production};

use crate::span::Span;

/// A derivation record for a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A matched terminal.
    Leaf(char),
    /// A non-terminal and the production chosen for it.
    Node {
        name: NonTerminal,
        /// Index of `production` among the non-terminal's alternatives.
        alternative: usize,
        production: Production,
        children: Vec<ParseNode>,
        span: Span,
    },
}

impl ParseNode {
    pub fn name(&self) -> Option<NonTerminal> {
        match self {
            ParseNode::Node { name, .. } => Some(*name),
            ParseNode::Leaf(_) => None,
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Node { children, .. } => children.as_slice(),
            ParseNode::Leaf(_) => &[],
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ParseNode::Node { span, .. } => Some(*span),
            ParseNode::Leaf(_) => None,
        }
    }

    /// The input text a node derived.
    pub fn matched<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.span().and_then(|span| span.as_str(input))
    }

    /// The terminals of this tree, left to right.
    pub fn leaves(&self) -> String {
        let mut out = String::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut String) {
        match self {
            ParseNode::Leaf(ch) => out.push(*ch),
            ParseNode::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Multi-line rendering, one node per line in pre-order.
    ///
    /// ```text
    /// S -> aB
    ///     |-- a
    ///     |-- B -> b
    ///     |    |-- b
    /// ```
    pub fn render(&self) -> TreeDisplay<'_> {
        TreeDisplay(self)
    }
}

/// Compact form, e.g. `S->aB[a, B->b[b]]`.
impl Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseNode::Leaf(ch) => write!(f, "{}", ch),
            ParseNode::Node {
                name,
                production,
                children,
                ..
            } => {
                write!(f, "{}->{}[", name, production)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// See [`ParseNode::render`].
pub struct TreeDisplay<'a>(&'a ParseNode);

impl<'a> TreeDisplay<'a> {
    fn write_children(
        f: &mut fmt::Formatter,
        children: &[ParseNode],
        indent: &mut String,
    ) -> fmt::Result {
        for child in children {
            match child {
                ParseNode::Leaf(ch) => writeln!(f, "{}    |-- {}", indent, ch)?,
                ParseNode::Node {
                    name,
                    production,
                    children,
                    ..
                } => {
                    writeln!(f, "{}    |-- {} -> {}", indent, name, production)?;
                    let len = indent.len();
                    indent.push_str("    |");
                    Self::write_children(f, children, indent)?;
                    indent.truncate(len);
                }
            }
        }
        Ok(())
    }
}

impl<'a> Display for TreeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            ParseNode::Leaf(ch) => writeln!(f, "{}", ch),
            ParseNode::Node {
                name,
                production,
                children,
                ..
            } => {
                writeln!(f, "{} -> {}", name, production)?;
                Self::write_children(f, children, &mut String::new())
            }
        }
    }
}
