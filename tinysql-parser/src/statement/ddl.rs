use tinysql_ast::{ColumnDef, CreateTableStmt, CreateViewStmt, DataType, DropTableStmt, Ident, Value};
use tinysql_lexer::Token;

use super::select::parse_select;
use crate::cursor::Parser;
use crate::error::ParserError;

/// Parses the body of a `CREATE TABLE` statement, with `CREATE TABLE`
/// already consumed.
pub fn parse_create_table(cursor: &mut Parser) -> Result<CreateTableStmt, ParserError> {
    let if_not_exists = cursor.parse_words(&["IF", "NOT", "EXISTS"]);
    let name = Ident::new(cursor.parse_identifier()?);
    cursor.expect_token(&Token::LeftParen)?;
    let columns = cursor.parse_comma_separated(parse_column_def)?;
    cursor.expect_token(&Token::RightParen)?;
    Ok(CreateTableStmt {
        name,
        if_not_exists,
        columns,
    })
}

fn parse_column_def(cursor: &mut Parser) -> Result<ColumnDef, ParserError> {
    let name = Ident::new(cursor.parse_identifier()?);
    let type_word = cursor.parse_identifier()?;
    let data_type = DataType::from_word(&type_word)
        .ok_or_else(|| ParserError::UnknownType(format!("Type '{type_word}' not recognized by SQL")))?;

    let default = if cursor.parse_word("DEFAULT") {
        Some(match data_type {
            DataType::Integer => match cursor.next_token() {
                Some(Token::Integer(v)) => Value::Integer(v),
                found => return cursor.expected("an integer default", found),
            },
            DataType::Real => match cursor.next_token() {
                Some(Token::Real(v)) => Value::Real(v),
                Some(Token::Integer(v)) => Value::Real(v as f64),
                found => return cursor.expected("a real default", found),
            },
            DataType::Text => match cursor.next_token() {
                Some(Token::Text(v)) => Value::Text(v),
                found => return cursor.expected("a text default", found),
            },
        })
    } else {
        None
    };

    Ok(ColumnDef {
        name,
        data_type,
        default,
    })
}

/// Parses the body of a `DROP TABLE` statement, with `DROP TABLE` already
/// consumed.
pub fn parse_drop_table(cursor: &mut Parser) -> Result<DropTableStmt, ParserError> {
    let if_exists = cursor.parse_words(&["IF", "EXISTS"]);
    let name = Ident::new(cursor.parse_identifier()?);
    Ok(DropTableStmt { name, if_exists })
}

/// Parses the body of a `CREATE VIEW` statement, with `CREATE VIEW` already
/// consumed.
pub fn parse_create_view(cursor: &mut Parser) -> Result<CreateViewStmt, ParserError> {
    let name = Ident::new(cursor.parse_identifier()?);
    cursor.expect_word("AS")?;
    cursor.expect_word("SELECT")?;
    let query = parse_select(cursor)?;
    Ok(CreateViewStmt { name, query })
}
