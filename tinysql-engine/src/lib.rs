//! # tinysql-engine
//!
//! The catalog, lock manager, and connection-level transaction machinery
//! that execute parsed tinysql statements against an in-memory database.

#![deny(missing_docs)]
#![deny(unused_imports)]

mod connection;
mod database;
mod error;
mod lock;
mod registry;
mod table;
mod view;

pub use self::{
    connection::Connection,
    database::Database,
    error::{EngineError, Result},
    registry::Registry,
    table::{left_outer_join, Collation, Row, Table},
    view::View,
};
