use thiserror::Error;
use tinysql_parser::ParserError;

/// Everything that can go wrong executing a statement against the engine.
///
/// These variants mirror the exception taxonomy the engine's statement
/// dispatch raises from: a malformed query, an unrecognized command, a type
/// mismatch against a column's declared type, a table/view lookup failure,
/// and a transaction/locking violation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The statement could not be tokenized or parsed.
    #[error("query error: {0}")]
    Query(String),
    /// The statement was well-formed SQL but not a recognized command.
    #[error("command error: {0}")]
    Command(String),
    /// A value did not match a column's declared type.
    #[error("type error: {0}")]
    Type(String),
    /// A table, view, or column reference did not resolve.
    #[error("table error: {0}")]
    Table(String),
    /// A transaction or locking rule was violated.
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl From<ParserError> for EngineError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::UnknownCommand(msg) => EngineError::Command(msg),
            ParserError::UnknownType(msg) => EngineError::Type(msg),
            ParserError::TokenizeError(msg) | ParserError::ParseError(msg) => EngineError::Query(msg),
        }
    }
}

/// Convenience alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
