//! # tinysql
//!
//! An embeddable, in-memory SQL engine: a restricted SQL dialect, a
//! connection-oriented API, and hierarchical lock-based transaction
//! isolation with catalog snapshotting.
//!
//! This crate is a thin facade over its sibling crates plus a process-wide
//! default [`Registry`] so callers can reach for [`connect`] the way the
//! system this was grounded on reaches for a module-level `connect`
//! function, without needing to construct a `Registry` themselves.

#![deny(missing_docs)]
#![deny(unused_imports)]

use std::sync::{Arc, OnceLock};

pub use tinysql_ast as ast;
pub use tinysql_engine as engine;
pub use tinysql_lexer as lexer;
pub use tinysql_parser as parser;

pub use tinysql_engine::{Connection, EngineError, Registry};

/// Options accepted by [`connect_with`].
///
/// Neither field is enforced by the engine: both are accepted and ignored,
/// the documented resolution for `timeout`/`isolation_level` having no
/// locking or isolation-level enforcement to attach to in this engine.
#[derive(Clone, Debug, Default)]
pub struct ConnectOptions {
    /// Busy-wait timeout in seconds.
    pub timeout: Option<f64>,
    /// Requested isolation level name.
    pub isolation_level: Option<String>,
}

fn default_registry() -> &'static Arc<Registry> {
    static REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

/// Opens a connection against `filename` using the process-wide default
/// registry, creating the named database the first time it is seen.
pub fn connect(filename: impl Into<String>) -> Connection {
    connect_with(filename, ConnectOptions::default())
}

/// Opens a connection against `filename` with explicit [`ConnectOptions`].
pub fn connect_with(filename: impl Into<String>, _options: ConnectOptions) -> Connection {
    default_registry().connect(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_creates_an_empty_database_on_first_use() {
        let mut conn = connect("facade-test.db");
        conn.execute("CREATE TABLE t (a INTEGER);").unwrap();
        let rows = conn.execute("SELECT * FROM t;").unwrap();
        assert!(rows.is_empty());
    }
}
