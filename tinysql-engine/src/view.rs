use tinysql_ast::SelectStmt;

use crate::database::Database;
use crate::error::Result;
use crate::table::Table;

/// A named view: a stored query that re-materializes against the current
/// catalog state on every access, with no caching.
#[derive(Clone)]
pub struct View {
    /// The view's defining query.
    pub query: SelectStmt,
}

impl View {
    /// Creates a view over `query`.
    pub fn new(query: SelectStmt) -> Self {
        Self { query }
    }

    /// Re-executes the defining query against `database` and returns the
    /// resulting ephemeral table.
    pub fn materialize(&self, database: &Database) -> Result<Table> {
        database.execute_select_as_table(&self.query)
    }
}
