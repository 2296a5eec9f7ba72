use anyhow::anyhow;

/// Keep track of a position within a str, updating on successful operations.
#[derive(Debug, Clone)]
pub struct Position<'a> {
    pub input: &'a str,
    pub idx: usize,
}

impl<'a> Position<'a> {
    /// Create a new cursor, ensuring that `start` is within bounds and on a
    /// char boundary.
    pub fn new(input: &'a str, start: usize) -> Result<Self, anyhow::Error> {
        if start > input.len() {
            Err(anyhow!(
                "start beyond end of input, start: {}, len: {}, input: {}",
                start,
                input.len(),
                input
            ))
        } else if !input.is_char_boundary(start) {
            Err(anyhow!(
                "start not on a char boundary, start: {}, input: {}",
                start,
                input
            ))
        } else {
            Ok(Position { input, idx: start })
        }
    }

    /// A cursor at the beginning of `input`.
    pub fn start(input: &'a str) -> Self {
        Position { input, idx: 0 }
    }

    /// The character at the current index.
    pub fn peek(&self) -> Option<char> {
        self.input[self.idx..].chars().next()
    }

    /// Check if `ch` is the next character of input. The index will be
    /// moved past it on match.
    pub fn match_char(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.idx += ch.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.idx == self.input.len()
    }
}
