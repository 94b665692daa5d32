use std::fmt;

use crate::{Ident, Value};

use super::WhereClause;

/// `INSERT INTO name [(cols...)] VALUES (v, v, ...), ...` or
/// `INSERT INTO name DEFAULT VALUES`.
#[derive(Clone, Debug, PartialEq)]
pub enum InsertSource {
    /// `DEFAULT VALUES` — one all-default row.
    DefaultValues,
    /// An explicit `VALUES` list, one `Vec<Value>` per row.
    Values(Vec<Vec<Value>>),
}

/// `INSERT INTO ...`
#[derive(Clone, Debug, PartialEq)]
pub struct InsertStmt {
    /// The target table.
    pub table: Ident,
    /// The explicit column list, if given; `None` means every column in
    /// declaration order.
    pub columns: Option<Vec<Ident>>,
    /// The rows (or `DEFAULT VALUES`) to insert.
    pub source: InsertSource,
}

impl fmt::Display for InsertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if let Some(columns) = &self.columns {
            write!(f, " (")?;
            for (i, col) in columns.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{col}")?;
            }
            write!(f, ")")?;
        }
        match &self.source {
            InsertSource::DefaultValues => write!(f, " DEFAULT VALUES"),
            InsertSource::Values(rows) => {
                write!(f, " VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "(")?;
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{value}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

/// `col = value` inside an `UPDATE ... SET`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// The column being assigned.
    pub column: Ident,
    /// The new value.
    pub value: Value,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

/// `UPDATE name SET a = v, ... [WHERE ...]`
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateStmt {
    /// The table to update.
    pub table: Ident,
    /// The column assignments, applied left-to-right against each matching row.
    pub assignments: Vec<Assignment>,
    /// The optional `WHERE` predicate.
    pub filter: Option<WhereClause>,
}

impl fmt::Display for UpdateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET ", self.table)?;
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{assignment}")?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {filter}")?;
        }
        Ok(())
    }
}

/// `DELETE FROM name [WHERE ...]`
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteStmt {
    /// The table to delete from.
    pub table: Ident,
    /// The optional `WHERE` predicate; `None` deletes every row.
    pub filter: Option<WhereClause>,
}

impl fmt::Display for DeleteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {filter}")?;
        }
        Ok(())
    }
}
