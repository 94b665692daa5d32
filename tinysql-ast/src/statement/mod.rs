mod ddl;
mod dml;
mod select;
mod transaction;

use std::fmt;

pub use self::{ddl::*, dml::*, select::*, transaction::*};

/// A top-level tinysql statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `CREATE TABLE ...`
    CreateTable(CreateTableStmt),
    /// `DROP TABLE ...`
    DropTable(DropTableStmt),
    /// `CREATE VIEW ... AS ...`
    CreateView(CreateViewStmt),
    /// `INSERT INTO ...`
    Insert(InsertStmt),
    /// `SELECT ...`
    Select(SelectStmt),
    /// `UPDATE ... SET ...`
    Update(UpdateStmt),
    /// `DELETE FROM ...`
    Delete(DeleteStmt),
    /// `BEGIN [DEFERRED|IMMEDIATE|EXCLUSIVE] TRANSACTION`
    Begin(BeginStmt),
    /// `COMMIT TRANSACTION`
    Commit,
    /// `ROLLBACK TRANSACTION`
    Rollback,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateTable(s) => write!(f, "{s}"),
            Statement::DropTable(s) => write!(f, "{s}"),
            Statement::CreateView(s) => write!(f, "{s}"),
            Statement::Insert(s) => write!(f, "{s}"),
            Statement::Select(s) => write!(f, "{s}"),
            Statement::Update(s) => write!(f, "{s}"),
            Statement::Delete(s) => write!(f, "{s}"),
            Statement::Begin(s) => write!(f, "{s}"),
            Statement::Commit => f.write_str("COMMIT TRANSACTION"),
            Statement::Rollback => f.write_str("ROLLBACK TRANSACTION"),
        }
    }
}
