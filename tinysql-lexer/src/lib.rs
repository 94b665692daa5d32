//! # tinysql-lexer
//!
//! Converts tinysql statement text into a flat token stream.

#![deny(missing_docs)]
#![deny(unused_imports)]

mod error;
mod lexer;
mod token;

pub use self::{
    error::{LexerError, Location},
    lexer::Lexer,
    token::Token,
};
