use std::fmt;

use crate::{Ident, Value};

/// A comparison operator usable in a `WHERE` clause.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl BinaryOperator {
    /// Parses an operator keyword/symbol, returning `None` for anything
    /// unrecognized.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "<" => Some(BinaryOperator::Lt),
            ">" => Some(BinaryOperator::Gt),
            "=" => Some(BinaryOperator::Eq),
            "!=" => Some(BinaryOperator::NotEq),
            "IS" => Some(BinaryOperator::Is),
            "IS NOT" => Some(BinaryOperator::IsNot),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Is => "IS",
            BinaryOperator::IsNot => "IS NOT",
        })
    }
}

/// One operand of a `WHERE` comparison: either a column reference or a
/// literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A (possibly table-qualified) column name.
    Column(Ident),
    /// A literal value.
    Value(Value),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(c) => write!(f, "{c}"),
            Operand::Value(v) => write!(f, "{v}"),
        }
    }
}

/// A single `left op right` predicate, as produced by a `WHERE` clause.
#[derive(Clone, Debug, PartialEq)]
pub struct WhereClause {
    /// The left-hand operand.
    pub left: Operand,
    /// The comparison operator.
    pub op: BinaryOperator,
    /// The right-hand operand.
    pub right: Operand,
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// `a = b` join condition of a `LEFT OUTER JOIN`.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinClause {
    /// The table being joined in.
    pub table: Ident,
    /// Left-hand side of the `ON` equality.
    pub left: Ident,
    /// Right-hand side of the `ON` equality.
    pub right: Ident,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LEFT OUTER JOIN {} ON {} = {}",
            self.table, self.left, self.right
        )
    }
}

/// An aggregate function applied to a projected column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AggFunc {
    /// `MIN(col)`
    Min,
    /// `MAX(col)`
    Max,
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggFunc::Min => "min",
            AggFunc::Max => "max",
        })
    }
}

/// A single entry of a `SELECT` projection list.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectItem {
    /// `*` — every column of every `FROM`/joined table.
    Wildcard,
    /// `table.*` — every column of one table.
    QualifiedWildcard(Ident),
    /// A plain (possibly table-qualified) column reference.
    Column(Ident),
    /// `min(col)` or `max(col)`.
    Aggregate(AggFunc, Ident),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Wildcard => f.write_str("*"),
            SelectItem::QualifiedWildcard(t) => write!(f, "{t}.*"),
            SelectItem::Column(c) => write!(f, "{c}"),
            SelectItem::Aggregate(func, c) => write!(f, "{func}({c})"),
        }
    }
}

/// Sort direction of a single `ORDER BY` key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `ASC` (the default when omitted).
    Asc,
    /// `DESC`
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        })
    }
}

/// A single `col [COLLATE name] [ASC|DESC]` sort key.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderByItem {
    /// The column to sort by.
    pub column: Ident,
    /// The named collation to compare with, if any.
    pub collation: Option<Ident>,
    /// Sort direction.
    pub direction: Direction,
}

impl fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {collation}")?;
        }
        write!(f, " {}", self.direction)
    }
}

/// `SELECT [DISTINCT] items FROM table [LEFT OUTER JOIN ...] [WHERE ...] [ORDER BY ...]`
#[derive(Clone, Debug, PartialEq)]
pub struct SelectStmt {
    /// Whether `DISTINCT` was present.
    pub distinct: bool,
    /// The projection list.
    pub items: Vec<SelectItem>,
    /// The primary table named in `FROM`.
    pub from: Ident,
    /// The optional `LEFT OUTER JOIN`.
    pub join: Option<JoinClause>,
    /// The optional `WHERE` predicate.
    pub filter: Option<WhereClause>,
    /// The optional `ORDER BY` key list, evaluated in listed order.
    pub order_by: Vec<OrderByItem>,
}

impl fmt::Display for SelectStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, " FROM {}", self.from)?;
        if let Some(join) = &self.join {
            write!(f, " {join}")?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {filter}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY ")?;
            for (i, item) in self.order_by.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_display_round_trip() {
        let stmt = SelectStmt {
            distinct: true,
            items: vec![
                SelectItem::Column(Ident::from("name")),
                SelectItem::Aggregate(AggFunc::Max, Ident::from("age")),
            ],
            from: Ident::from("students"),
            join: None,
            filter: Some(WhereClause {
                left: Operand::Column(Ident::from("age")),
                op: BinaryOperator::Gt,
                right: Operand::Value(Value::Integer(18)),
            }),
            order_by: vec![OrderByItem {
                column: Ident::from("name"),
                collation: Some(Ident::from("nocase")),
                direction: Direction::Desc,
            }],
        };
        assert_eq!(
            stmt.to_string(),
            "SELECT DISTINCT name, max(age) FROM students WHERE age > 18 \
             ORDER BY name COLLATE nocase DESC"
        );
    }
}
