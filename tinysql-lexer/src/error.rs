use std::fmt;

/// A line/column position within the source text being tokenized.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, Column: {}", self.line, self.column)
    }
}

impl Location {
    pub(crate) fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.column = 1;
            self.line += 1;
        } else {
            self.column += 1;
        }
    }

    pub(crate) fn into_error(self, message: impl Into<String>) -> LexerError {
        LexerError {
            message: message.into(),
            location: self,
        }
    }
}

/// An error produced while tokenizing a statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LexerError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Where in the input the error was detected.
    pub location: Location,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

impl std::error::Error for LexerError {}
