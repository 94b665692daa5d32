use std::fmt;

use tinysql_lexer::LexerError;

/// An error produced while tokenizing or parsing a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ParserError {
    /// The input could not be tokenized.
    TokenizeError(String),
    /// The token stream did not match the grammar.
    ParseError(String),
    /// The leading keyword is not any recognized statement.
    UnknownCommand(String),
    /// A `CREATE TABLE` column named a type outside `INTEGER`/`REAL`/`TEXT`.
    UnknownType(String),
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParserError::TokenizeError(s) => s,
            ParserError::ParseError(s) => s,
            ParserError::UnknownCommand(s) => s,
            ParserError::UnknownType(s) => s,
        })
    }
}

impl std::error::Error for ParserError {}

impl From<LexerError> for ParserError {
    fn from(err: LexerError) -> Self {
        Self::TokenizeError(err.to_string())
    }
}

impl From<String> for ParserError {
    fn from(err: String) -> Self {
        Self::ParseError(err)
    }
}

impl From<&str> for ParserError {
    fn from(err: &str) -> Self {
        Self::ParseError(err.into())
    }
}

/// Helper to construct a parse error.
pub(crate) fn parse_error<R>(message: impl Into<String>) -> Result<R, ParserError> {
    Err(ParserError::ParseError(message.into()))
}
