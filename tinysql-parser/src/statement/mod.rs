mod ddl;
mod dml;
mod select;
mod transaction;

use tinysql_ast::Statement;
use tinysql_lexer::Token;

use crate::cursor::Parser;
use crate::error::ParserError;

/// Parses one complete, semicolon-terminated statement from `sql`.
///
/// The grammar has no reserved-word list, so statements are recognized from
/// the leading word tokens rather than from a token kind; keywords must be
/// written in upper case.
pub fn parse(sql: &str) -> Result<Statement, ParserError> {
    let mut cursor = Parser::new_with_sql(sql)?;
    let statement = parse_statement(&mut cursor)?;
    cursor.expect_token(&Token::SemiColon)?;
    Ok(statement)
}

fn parse_statement(cursor: &mut Parser) -> Result<Statement, ParserError> {
    if cursor.parse_word("BEGIN") {
        return transaction::parse_begin(cursor).map(Statement::Begin);
    }
    if cursor.parse_words(&["COMMIT", "TRANSACTION"]) {
        return Ok(Statement::Commit);
    }
    if cursor.parse_words(&["ROLLBACK", "TRANSACTION"]) {
        return Ok(Statement::Rollback);
    }
    if cursor.parse_words(&["CREATE", "TABLE"]) {
        return ddl::parse_create_table(cursor).map(Statement::CreateTable);
    }
    if cursor.parse_words(&["DROP", "TABLE"]) {
        return ddl::parse_drop_table(cursor).map(Statement::DropTable);
    }
    if cursor.parse_words(&["CREATE", "VIEW"]) {
        return ddl::parse_create_view(cursor).map(Statement::CreateView);
    }
    if cursor.parse_words(&["INSERT", "INTO"]) {
        return dml::parse_insert(cursor).map(Statement::Insert);
    }
    if cursor.parse_word("SELECT") {
        return select::parse_select(cursor).map(Statement::Select);
    }
    if cursor.parse_word("UPDATE") {
        return dml::parse_update(cursor).map(Statement::Update);
    }
    if cursor.parse_words(&["DELETE", "FROM"]) {
        return dml::parse_delete(cursor).map(Statement::Delete);
    }

    let found = cursor.peek_token().cloned();
    Err(ParserError::UnknownCommand(match found {
        Some(found) => format!("Command not recognized, found {found}"),
        None => "Command not recognized, but input ended".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinysql_ast::{
        ColumnDef, CreateTableStmt, DataType, Ident, SelectItem, TransactionMode, Value,
    };

    #[test]
    fn parses_create_table() {
        let stmt = parse("CREATE TABLE students (name TEXT, age INTEGER DEFAULT 0);").unwrap();
        assert_eq!(
            stmt,
            Statement::CreateTable(CreateTableStmt {
                name: Ident::from("students"),
                if_not_exists: false,
                columns: vec![
                    ColumnDef {
                        name: Ident::from("name"),
                        data_type: DataType::Text,
                        default: None,
                    },
                    ColumnDef {
                        name: Ident::from("age"),
                        data_type: DataType::Integer,
                        default: Some(Value::Integer(0)),
                    },
                ],
            })
        );
    }

    #[test]
    fn parses_select_with_where_and_order_by() {
        let stmt = parse("SELECT name FROM students WHERE age > 18 ORDER BY name DESC;").unwrap();
        match stmt {
            Statement::Select(select) => {
                assert_eq!(select.items, vec![SelectItem::Column(Ident::from("name"))]);
                assert_eq!(select.order_by.len(), 1);
            }
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn parses_begin_immediate() {
        let stmt = parse("BEGIN IMMEDIATE TRANSACTION;").unwrap();
        assert_eq!(
            stmt,
            Statement::Begin(tinysql_ast::BeginStmt {
                mode: TransactionMode::Immediate,
            })
        );
    }

    #[test]
    fn missing_trailing_semicolon_is_an_error() {
        assert!(parse("SELECT * FROM t").is_err());
    }

    #[test]
    fn unrecognized_command_is_an_error() {
        assert!(matches!(
            parse("FROBNICATE t;"),
            Err(ParserError::UnknownCommand(_))
        ));
    }

    #[test]
    fn unrecognized_column_type_is_an_error() {
        assert!(matches!(
            parse("CREATE TABLE t (a FROBNICATE);"),
            Err(ParserError::UnknownType(_))
        ));
    }
}
