use std::fmt::{self, Display};

use grammar::GrammarDefect;

pub type Result<T> = std::result::Result<T, DeriveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DeriveError {
    MissingGrammarSource,
    MultipleGrammarSources,
    InvalidGrammar(String),
    InvalidStart(String),
    Defect(GrammarDefect),
    Other(String),
}

impl Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeriveError::MissingGrammarSource => write!(f, "No grammar source provided"),
            DeriveError::MultipleGrammarSources => {
                write!(f, "At most one grammar source can be provided")
            }
            DeriveError::InvalidGrammar(ref s) => write!(f, "Invalid grammar: {}", s),
            DeriveError::InvalidStart(ref s) => {
                write!(f, "Start symbol must be a single uppercase letter, got {:?}", s)
            }
            DeriveError::Defect(ref defect) => write!(f, "{}", defect),
            DeriveError::Other(ref s) => write!(f, "Derive error: {}", s),
        }
    }
}

impl From<syn::Error> for DeriveError {
    fn from(e: syn::Error) -> DeriveError {
        DeriveError::Other(format!("syn error: {}", e))
    }
}

impl From<grammar::Error> for DeriveError {
    fn from(e: grammar::Error) -> DeriveError {
        DeriveError::InvalidGrammar(e.to_string())
    }
}

impl From<GrammarDefect> for DeriveError {
    fn from(defect: GrammarDefect) -> DeriveError {
        DeriveError::Defect(defect)
    }
}
