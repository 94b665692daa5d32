//! # tinysql-parser
//!
//! Recursive-descent parser that turns a tinysql statement string into a
//! typed [`tinysql_ast::Statement`].

#![deny(missing_docs)]
#![deny(unused_imports)]

mod cursor;
mod error;
mod statement;

pub use self::{cursor::Parser, error::ParserError, statement::parse};
