use tinysql_ast::{
    AggFunc, BinaryOperator, Direction, Ident, JoinClause, Operand, OrderByItem, SelectItem,
    SelectStmt, Value, WhereClause,
};
use tinysql_lexer::Token;

use crate::cursor::Parser;
use crate::error::ParserError;

/// Parses the body of a `SELECT` statement, with the leading `SELECT` token
/// already consumed.
pub fn parse_select(cursor: &mut Parser) -> Result<SelectStmt, ParserError> {
    let distinct = cursor.parse_word("DISTINCT");

    let mut items = Vec::new();
    loop {
        items.push(parse_select_item(cursor)?);
        if cursor.parse_word("FROM") {
            break;
        }
        cursor.expect_token(&Token::Comma)?;
    }

    let from = Ident::new(cursor.parse_identifier()?);

    let mut join = None;
    let mut filter = None;
    let mut order_by = Vec::new();

    loop {
        if cursor.parse_words(&["LEFT", "OUTER", "JOIN"]) {
            let table = Ident::new(cursor.parse_identifier()?);
            cursor.expect_word("ON")?;
            let left = Ident::new(cursor.parse_identifier()?);
            cursor.expect_token(&Token::Eq)?;
            let right = Ident::new(cursor.parse_identifier()?);
            join = Some(JoinClause { table, left, right });
        } else if cursor.parse_word("WHERE") {
            filter = Some(parse_where_clause(cursor)?);
        } else if cursor.parse_words(&["ORDER", "BY"]) {
            order_by = parse_order_by(cursor)?;
        } else {
            break;
        }
    }

    Ok(SelectStmt {
        distinct,
        items,
        from,
        join,
        filter,
        order_by,
    })
}

fn parse_select_item(cursor: &mut Parser) -> Result<SelectItem, ParserError> {
    if let Some(func) = peek_agg_func(cursor) {
        cursor.next_token();
        cursor.expect_token(&Token::LeftParen)?;
        let column = Ident::new(cursor.parse_identifier()?);
        cursor.expect_token(&Token::RightParen)?;
        return Ok(SelectItem::Aggregate(func, column));
    }

    let name = cursor.parse_identifier()?;
    if name == "*" {
        Ok(SelectItem::Wildcard)
    } else if let Some(table) = name.strip_suffix(".*") {
        Ok(SelectItem::QualifiedWildcard(Ident::new(table)))
    } else {
        Ok(SelectItem::Column(Ident::new(name)))
    }
}

fn peek_agg_func(cursor: &Parser) -> Option<AggFunc> {
    let func = match cursor.peek_token() {
        Some(Token::Word(w)) if w == "max" => AggFunc::Max,
        Some(Token::Word(w)) if w == "min" => AggFunc::Min,
        _ => return None,
    };
    matches!(cursor.peek_nth(1), Some(Token::LeftParen)).then_some(func)
}

pub(crate) fn parse_where_clause(cursor: &mut Parser) -> Result<WhereClause, ParserError> {
    let left = parse_operand(cursor)?;
    let op = parse_operator(cursor)?;
    let right = parse_operand(cursor)?;
    Ok(WhereClause { left, op, right })
}

fn parse_operator(cursor: &mut Parser) -> Result<BinaryOperator, ParserError> {
    match cursor.next_token() {
        Some(Token::Lt) => Ok(BinaryOperator::Lt),
        Some(Token::Gt) => Ok(BinaryOperator::Gt),
        Some(Token::Eq) => Ok(BinaryOperator::Eq),
        Some(Token::NotEq) => Ok(BinaryOperator::NotEq),
        Some(Token::Is) => Ok(BinaryOperator::Is),
        Some(Token::IsNot) => Ok(BinaryOperator::IsNot),
        found => cursor.expected("a comparison operator", found),
    }
}

fn parse_operand(cursor: &mut Parser) -> Result<Operand, ParserError> {
    match cursor.next_token() {
        Some(Token::Word(w)) => Ok(Operand::Column(Ident::new(w))),
        Some(Token::Integer(v)) => Ok(Operand::Value(Value::Integer(v))),
        Some(Token::Real(v)) => Ok(Operand::Value(Value::Real(v))),
        Some(Token::Text(v)) => Ok(Operand::Value(Value::Text(v))),
        Some(Token::Null) => Ok(Operand::Value(Value::Null)),
        found => cursor.expected("a column or literal", found),
    }
}

fn parse_order_by(cursor: &mut Parser) -> Result<Vec<OrderByItem>, ParserError> {
    let mut items = Vec::new();
    loop {
        let column = Ident::new(cursor.parse_identifier()?);
        let collation = if cursor.parse_word("COLLATE") {
            Some(Ident::new(cursor.parse_identifier()?))
        } else {
            None
        };
        let direction = if cursor.parse_word("DESC") {
            Direction::Desc
        } else {
            cursor.parse_word("ASC");
            Direction::Asc
        };
        items.push(OrderByItem {
            column,
            collation,
            direction,
        });
        if !cursor.next_token_if_eq(&Token::Comma) {
            break;
        }
    }
    Ok(items)
}
