use std::collections::HashMap;

use tinysql_ast::{
    CreateTableStmt, CreateViewStmt, DeleteStmt, DropTableStmt, Ident, InsertSource, InsertStmt,
    SelectStmt, UpdateStmt,
};

use crate::error::{EngineError, Result};
use crate::table::{left_outer_join, Collation, Row, Table};
use crate::view::View;

/// A named, catalog-resident table or view.
#[derive(Clone)]
enum Relation {
    Table(Table),
    View(View),
}

/// The full set of tables and views making up a single in-memory database,
/// plus the named collations registered against it.
///
/// Transactions work by deep-cloning this structure at `BEGIN` and replacing
/// the published catalog with the (possibly modified) clone at `COMMIT` —
/// there is no copy-on-write or MVCC layer underneath.
#[derive(Clone, Default)]
pub struct Database {
    tables: HashMap<String, Relation>,
    /// User-registered `ORDER BY ... COLLATE` comparators.
    pub collations: HashMap<String, Collation>,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    fn relation(&self, name: &Ident) -> Result<&Relation> {
        self.tables
            .get(name.as_str())
            .ok_or_else(|| EngineError::Table(format!("Table {name} does not exist")))
    }

    /// Returns a reference to a stored table, erroring on views.
    pub fn table(&self, name: &str) -> Result<&Table> {
        match self.tables.get(name) {
            Some(Relation::Table(table)) => Ok(table),
            Some(Relation::View(_)) => Err(EngineError::Table(format!("{name} is a view, not a table"))),
            None => Err(EngineError::Table(format!("Table {name} does not exist"))),
        }
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        match self.tables.get_mut(name) {
            Some(Relation::Table(table)) => Ok(table),
            Some(Relation::View(_)) => Err(EngineError::Table(format!("{name} is a view, not a table"))),
            None => Err(EngineError::Table(format!("Table {name} does not exist"))),
        }
    }

    /// `CREATE TABLE`
    pub fn create_table(&mut self, stmt: &CreateTableStmt) -> Result<()> {
        if self.tables.contains_key(stmt.name.as_str()) {
            if stmt.if_not_exists {
                return Ok(());
            }
            return Err(EngineError::Table(format!("Table {} already exists", stmt.name)));
        }
        let table = Table::new(stmt.name.as_str(), stmt.columns.clone())?;
        self.tables.insert(stmt.name.0.clone(), Relation::Table(table));
        tracing::debug!(table = %stmt.name, "created table");
        Ok(())
    }

    /// `DROP TABLE`
    pub fn drop_table(&mut self, stmt: &DropTableStmt) -> Result<()> {
        if !self.tables.contains_key(stmt.name.as_str()) {
            if stmt.if_exists {
                return Ok(());
            }
            return Err(EngineError::Table(format!("Table {} does not exist", stmt.name)));
        }
        self.tables.remove(stmt.name.as_str());
        tracing::debug!(table = %stmt.name, "dropped table");
        Ok(())
    }

    /// `CREATE VIEW`
    pub fn create_view(&mut self, stmt: &CreateViewStmt) -> Result<()> {
        if self.tables.contains_key(stmt.name.as_str()) {
            return Err(EngineError::Table(format!("Table {} already exists", stmt.name)));
        }
        self.tables
            .insert(stmt.name.0.clone(), Relation::View(View::new(stmt.query.clone())));
        Ok(())
    }

    /// `INSERT INTO`
    pub fn insert(&mut self, stmt: &InsertStmt) -> Result<()> {
        let table = self.table_mut(stmt.table.as_str())?;
        let columns: Vec<String> = stmt
            .columns
            .as_ref()
            .map(|cols| cols.iter().map(|c| c.0.clone()).collect())
            .unwrap_or_default();
        match &stmt.source {
            InsertSource::DefaultValues => table.insert(Vec::new(), &columns, true),
            InsertSource::Values(rows) => table.insert(rows.clone(), &columns, false),
        }
    }

    /// `UPDATE`
    pub fn update(&mut self, stmt: &UpdateStmt) -> Result<()> {
        let table = self.table_mut(stmt.table.as_str())?;
        let matches = match &stmt.filter {
            Some(filter) => table.matches_filter(filter)?,
            None => (0..table.rows.len()).collect(),
        };
        for assignment in &stmt.assignments {
            table.assign(assignment.column.as_str(), &assignment.value, &matches)?;
        }
        Ok(())
    }

    /// `DELETE FROM`
    pub fn delete(&mut self, stmt: &DeleteStmt) -> Result<()> {
        let table = self.table_mut(stmt.table.as_str())?;
        match &stmt.filter {
            Some(filter) => {
                let matches = table.matches_filter(filter)?;
                table.delete_rows(&matches);
            }
            None => table.rows.clear(),
        }
        Ok(())
    }

    /// `SELECT`, returning just the resulting rows.
    pub fn select(&self, stmt: &SelectStmt) -> Result<Vec<Row>> {
        Ok(self.execute_select_as_table(stmt)?.rows)
    }

    /// Runs `stmt` and wraps the result in an ephemeral [`Table`] whose
    /// schema is the statement's own projection list — used both to answer a
    /// top-level `SELECT` and to materialize a [`View`].
    pub(crate) fn execute_select_as_table(&self, stmt: &SelectStmt) -> Result<Table> {
        let source = self.resolve_source(stmt)?;
        let columns = source.expand_items(&stmt.items)?;
        let rows = source.select(
            &stmt.items,
            stmt.distinct,
            stmt.filter.as_ref(),
            &stmt.order_by,
            &self.collations,
        )?;

        let mut types = Vec::with_capacity(columns.len());
        for column in &columns {
            let pos = source.position(column)?;
            types.push(source.types[pos].clone());
        }

        let mut rel_tables = Vec::new();
        for column in &columns {
            if let Some(table) = column.split_once('.').map(|(t, _)| t.to_string()) {
                if !rel_tables.contains(&table) {
                    rel_tables.push(table);
                }
            }
        }

        let mut result = Table::from_parts(
            stmt.from.0.clone(),
            columns,
            types,
            HashMap::new(),
            rel_tables,
        );
        result.rows = rows;
        Ok(result)
    }

    fn resolve_source(&self, stmt: &SelectStmt) -> Result<Table> {
        let base = self.materialized_relation(&stmt.from)?;
        match &stmt.join {
            None => Ok(base),
            Some(join) => {
                let joined = self.materialized_relation(&join.table)?;
                left_outer_join(&base, &joined, join.left.as_str(), join.right.as_str())
            }
        }
    }

    fn materialized_relation(&self, name: &Ident) -> Result<Table> {
        match self.relation(name)? {
            Relation::Table(table) => Ok(table.clone()),
            Relation::View(view) => view.materialize(self),
        }
    }
}
