//! # tinysql-ast
//!
//! Abstract syntax tree and value types shared by the tinysql lexer, parser
//! and engine.

#![deny(missing_docs)]
#![deny(unused_imports)]

mod ident;
mod statement;
mod value;

pub use self::{ident::Ident, statement::*, value::Value};
