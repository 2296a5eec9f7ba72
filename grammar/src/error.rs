use std::error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    ParseError(String),
    /// Non-terminals are named by a single uppercase letter.
    InvalidNonTerminal(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError(ref s) => write!(f, "failed to parse: {}", s),
            Error::InvalidNonTerminal(ch) => {
                write!(f, "'{}' is not a valid non-terminal name", ch)
            }
        }
    }
}

impl error::Error for Error {}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Error {
        Error::ParseError(format!("{:?}", err))
    }
}
