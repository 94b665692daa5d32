use tinysql_ast::{Assignment, DeleteStmt, Ident, InsertSource, InsertStmt, UpdateStmt, Value};
use tinysql_lexer::Token;

use super::select::parse_where_clause;
use crate::cursor::Parser;
use crate::error::ParserError;

/// Parses the body of an `INSERT INTO` statement, with `INSERT INTO` already
/// consumed.
pub fn parse_insert(cursor: &mut Parser) -> Result<InsertStmt, ParserError> {
    let table = Ident::new(cursor.parse_identifier()?);

    if cursor.parse_words(&["DEFAULT", "VALUES"]) {
        return Ok(InsertStmt {
            table,
            columns: None,
            source: InsertSource::DefaultValues,
        });
    }

    let columns = if cursor.next_token_if_eq(&Token::LeftParen) {
        let columns = cursor.parse_comma_separated(|cursor| {
            cursor.parse_identifier().map(Ident::new)
        })?;
        cursor.expect_token(&Token::RightParen)?;
        Some(columns)
    } else {
        None
    };

    cursor.expect_word("VALUES")?;
    let mut rows = Vec::new();
    loop {
        cursor.expect_token(&Token::LeftParen)?;
        let row = cursor.parse_comma_separated(parse_literal)?;
        cursor.expect_token(&Token::RightParen)?;
        rows.push(row);
        if !cursor.next_token_if_eq(&Token::Comma) {
            break;
        }
    }

    Ok(InsertStmt {
        table,
        columns,
        source: InsertSource::Values(rows),
    })
}

fn parse_literal(cursor: &mut Parser) -> Result<Value, ParserError> {
    match cursor.next_token() {
        Some(Token::Integer(v)) => Ok(Value::Integer(v)),
        Some(Token::Real(v)) => Ok(Value::Real(v)),
        Some(Token::Text(v)) => Ok(Value::Text(v)),
        Some(Token::Null) => Ok(Value::Null),
        found => cursor.expected("a literal value", found),
    }
}

/// Parses the body of an `UPDATE` statement, with `UPDATE` already consumed.
pub fn parse_update(cursor: &mut Parser) -> Result<UpdateStmt, ParserError> {
    let table = Ident::new(cursor.parse_identifier()?);
    cursor.expect_word("SET")?;

    let assignments = cursor.parse_comma_separated(|cursor| {
        let column = Ident::new(cursor.parse_identifier()?);
        cursor.expect_token(&Token::Eq)?;
        let value = parse_literal(cursor)?;
        Ok(Assignment { column, value })
    })?;

    let filter = if cursor.parse_word("WHERE") {
        Some(parse_where_clause(cursor)?)
    } else {
        None
    };

    Ok(UpdateStmt {
        table,
        assignments,
        filter,
    })
}

/// Parses the body of a `DELETE FROM` statement, with `DELETE FROM` already
/// consumed.
pub fn parse_delete(cursor: &mut Parser) -> Result<DeleteStmt, ParserError> {
    let table = Ident::new(cursor.parse_identifier()?);
    let filter = if cursor.parse_word("WHERE") {
        Some(parse_where_clause(cursor)?)
    } else {
        None
    };
    Ok(DeleteStmt { table, filter })
}
