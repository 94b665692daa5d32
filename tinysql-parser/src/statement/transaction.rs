use tinysql_ast::{BeginStmt, TransactionMode};

use crate::cursor::Parser;
use crate::error::ParserError;

/// Parses the body of a `BEGIN` statement, with `BEGIN` already consumed.
pub fn parse_begin(cursor: &mut Parser) -> Result<BeginStmt, ParserError> {
    let mode = if cursor.parse_word("IMMEDIATE") {
        TransactionMode::Immediate
    } else if cursor.parse_word("EXCLUSIVE") {
        TransactionMode::Exclusive
    } else {
        cursor.parse_word("DEFERRED");
        TransactionMode::Deferred
    };
    cursor.expect_word("TRANSACTION")?;
    Ok(BeginStmt { mode })
}
