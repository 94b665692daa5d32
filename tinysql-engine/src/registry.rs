use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::connection::Connection;
use crate::database::Database;
use crate::lock::LockCounts;

struct Entry {
    database: Database,
    locks: LockCounts,
}

/// A shared registry of named in-memory databases and their lock state.
///
/// Grounded on the module-level `_ALL_DATABASES`/`_LOCKS` dictionaries it
/// replaces, but behind a `Mutex` so `Connection`s living on different
/// threads can safely share the same named database.
pub struct Registry {
    entries: Mutex<HashMap<String, Entry>>,
}

impl Registry {
    /// Creates an empty registry holding no databases yet.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
        })
    }

    /// Opens a connection against `filename`, creating an empty database the
    /// first time it is seen under this registry.
    pub fn connect(self: &Arc<Self>, filename: impl Into<String>) -> Connection {
        let filename = filename.into();
        {
            let mut entries = self.entries.lock().expect("registry mutex poisoned");
            entries.entry(filename.clone()).or_insert_with(|| Entry {
                database: Database::new(),
                locks: LockCounts::default(),
            });
        }
        Connection::new(Arc::clone(self), filename)
    }

    pub(crate) fn snapshot(&self, filename: &str) -> Database {
        let entries = self.entries.lock().expect("registry mutex poisoned");
        entries
            .get(filename)
            .expect("connection outlived its registry entry")
            .database
            .clone()
    }

    pub(crate) fn publish(&self, filename: &str, database: Database) {
        let mut entries = self.entries.lock().expect("registry mutex poisoned");
        entries
            .get_mut(filename)
            .expect("connection outlived its registry entry")
            .database = database;
    }

    pub(crate) fn with_locks<R>(&self, filename: &str, f: impl FnOnce(&mut LockCounts) -> R) -> R {
        let mut entries = self.entries.lock().expect("registry mutex poisoned");
        let entry = entries
            .get_mut(filename)
            .expect("connection outlived its registry entry");
        f(&mut entry.locks)
    }
}
