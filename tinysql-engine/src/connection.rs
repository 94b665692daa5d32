use std::sync::Arc;

use tinysql_ast::{Statement, TransactionMode, Value};

use crate::database::Database;
use crate::error::{EngineError, Result};
use crate::lock::LockState;
use crate::registry::Registry;
use crate::table::{Collation, Row};

/// A single connection to a named in-memory database.
///
/// Holds its own transaction state (the snapshot it is working against, its
/// locking mode, and which locks it currently holds) independently of every
/// other connection open against the same [`Registry`] entry.
pub struct Connection {
    registry: Arc<Registry>,
    filename: String,
    database: Option<Database>,
    auto_commit: bool,
    modified: bool,
    mode: TransactionMode,
    locks: LockState,
}

impl Connection {
    pub(crate) fn new(registry: Arc<Registry>, filename: String) -> Self {
        Self {
            registry,
            filename,
            database: None,
            auto_commit: true,
            modified: false,
            mode: TransactionMode::Deferred,
            locks: LockState::default(),
        }
    }

    /// Closes the connection. Releases no state by itself; a connection with
    /// an open transaction should `ROLLBACK` or `COMMIT` first.
    pub fn close(&mut self) {}

    fn begin_deferred(&mut self) {
        self.database = Some(self.registry.snapshot(&self.filename));
    }

    fn begin_immediate(&mut self) -> Result<()> {
        self.database = Some(self.registry.snapshot(&self.filename));
        let filename = self.filename.clone();
        self.registry
            .with_locks(&filename, |counts| self.locks.begin_immediate(counts))
    }

    fn begin_exclusive(&mut self) -> Result<()> {
        self.database = Some(self.registry.snapshot(&self.filename));
        let filename = self.filename.clone();
        self.registry
            .with_locks(&filename, |counts| self.locks.begin_exclusive(counts))
    }

    /// Commits the active transaction.
    ///
    /// `force_publish` mirrors a quirk of the system this was grounded on:
    /// `CREATE`/`DROP` statements publish their snapshot unconditionally,
    /// bypassing the `modified` check every other statement goes through.
    fn commit(&mut self, force_publish: bool) -> Result<()> {
        let database = self
            .database
            .take()
            .expect("commit called without an active transaction");
        let filename = self.filename.clone();

        if force_publish {
            self.registry.publish(&filename, database);
            return Ok(());
        }

        if !self.modified {
            self.registry
                .with_locks(&filename, |counts| self.locks.unlock(counts));
            return Ok(());
        }

        self.registry
            .with_locks(&filename, |counts| self.locks.can_be_exclusive(counts))?;
        self.registry.publish(&filename, database);
        self.registry
            .with_locks(&filename, |counts| self.locks.unlock(counts));
        Ok(())
    }

    fn rollback(&mut self) {
        self.database = None;
    }

    fn active_database(&mut self) -> Result<&mut Database> {
        self.database
            .as_mut()
            .ok_or_else(|| EngineError::Transaction("No active transaction".to_string()))
    }

    /// Parses and runs a single statement, returning its result rows (empty
    /// for every statement except `SELECT`).
    pub fn execute(&mut self, statement: &str) -> Result<Vec<Row>> {
        tracing::debug!(filename = %self.filename, statement, "executing statement");
        let parsed = tinysql_parser::parse(statement)?;

        if self.auto_commit {
            self.begin_deferred();
        }

        let filename = self.filename.clone();
        match &parsed {
            Statement::Select(_) => {
                self.registry
                    .with_locks(&filename, |counts| self.locks.lockable_select(counts))?;
            }
            Statement::Insert(_) | Statement::Update(_) | Statement::Delete(_) => {
                self.modified = true;
                if let Err(err) = self
                    .registry
                    .with_locks(&filename, |counts| self.locks.lockable_write(counts))
                {
                    tracing::warn!(filename = %self.filename, %err, "write lock denied");
                    return Err(err);
                }
            }
            _ => {}
        }

        let mut force_publish = false;
        let mut rows = Vec::new();

        match parsed {
            Statement::Begin(begin) => {
                if !self.auto_commit {
                    self.registry
                        .with_locks(&filename, |counts| self.locks.unlock(counts));
                    return Err(EngineError::Transaction(
                        "Cannot begin a transaction inside of another transaction".to_string(),
                    ));
                }
                self.mode = begin.mode;
                self.auto_commit = false;
                match begin.mode {
                    TransactionMode::Deferred => self.begin_deferred(),
                    TransactionMode::Immediate => self.begin_immediate()?,
                    TransactionMode::Exclusive => self.begin_exclusive()?,
                }
                return Ok(Vec::new());
            }
            Statement::Commit => {
                if self.auto_commit {
                    self.registry
                        .with_locks(&filename, |counts| self.locks.unlock(counts));
                    return Err(EngineError::Transaction(
                        "Tried to commit a non-existent transaction".to_string(),
                    ));
                }
                self.commit(false)?;
                self.modified = false;
                self.auto_commit = true;
                return Ok(Vec::new());
            }
            Statement::Rollback => {
                if self.auto_commit {
                    self.registry
                        .with_locks(&filename, |counts| self.locks.unlock(counts));
                    return Err(EngineError::Transaction(
                        "Tried to rollback a non-existent transaction".to_string(),
                    ));
                }
                self.rollback();
                self.modified = false;
                self.auto_commit = true;
                return Ok(Vec::new());
            }
            Statement::CreateTable(stmt) => {
                self.active_database()?.create_table(&stmt)?;
                force_publish = true;
            }
            Statement::DropTable(stmt) => {
                self.active_database()?.drop_table(&stmt)?;
                force_publish = true;
            }
            Statement::CreateView(stmt) => {
                self.active_database()?.create_view(&stmt)?;
                force_publish = true;
            }
            Statement::Insert(stmt) => {
                self.active_database()?.insert(&stmt)?;
            }
            Statement::Select(stmt) => {
                rows = self.active_database()?.select(&stmt)?;
            }
            Statement::Update(stmt) => {
                self.active_database()?.update(&stmt)?;
            }
            Statement::Delete(stmt) => {
                self.active_database()?.delete(&stmt)?;
            }
        }

        if self.auto_commit {
            self.commit(force_publish)?;
            self.modified = false;
        }

        Ok(rows)
    }

    /// Runs `statement` once per entry of `values`, substituting each `?`
    /// placeholder (in order) with the corresponding value, quoting text
    /// values with single quotes.
    ///
    /// This is plain textual substitution, the same shortcut it was
    /// grounded on takes: a text value containing a `'` is not escaped and
    /// will corrupt the generated statement rather than being rejected.
    pub fn executemany(&mut self, statement: &str, values: &[Vec<Value>]) -> Result<()> {
        let values_pos = statement
            .find("VALUES")
            .ok_or_else(|| EngineError::Query("Cannot find statement to insert into".to_string()))?;
        let (before, after) = statement.split_at(values_pos);

        let start = after
            .find('(')
            .ok_or_else(|| EngineError::Query("Cannot find statement to insert into".to_string()))?;
        let end = after
            .find(')')
            .ok_or_else(|| EngineError::Query("Cannot find statement to insert into".to_string()))?;
        let template = &after[start..=end];

        let mut built = format!("{before}VALUES ");
        for row in values {
            let mut clause = template.to_string();
            for value in row {
                let rendered = match value {
                    Value::Text(text) => format!("'{text}'"),
                    other => other.to_string(),
                };
                clause = clause.replacen('?', &rendered, 1);
            }
            built.push_str(&clause);
            built.push_str(", ");
        }
        built.truncate(built.len() - 2);
        built.push(';');

        self.execute(&built)?;
        Ok(())
    }

    /// Registers a named collation usable by `ORDER BY ... COLLATE`.
    ///
    /// Collations are schema, not transactional data: the comparator is
    /// published immediately regardless of whether a transaction is open,
    /// and also mirrored into the working snapshot so a later statement in
    /// the same transaction can already see it.
    pub fn create_collation(&mut self, name: impl Into<String>, f: Collation) {
        let name = name.into();
        let filename = self.filename.clone();

        if let Some(database) = self.database.as_mut() {
            database.collations.insert(name.clone(), f.clone());
        }

        let mut published = self.registry.snapshot(&filename);
        published.collations.insert(name, f);
        self.registry.publish(&filename, published);
    }
}
