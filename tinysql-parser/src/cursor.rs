use std::fmt::Display;

use tinysql_lexer::{Lexer, Token};

use crate::error::{parse_error, ParserError};

/// A token cursor over a statement's tokens, with lookahead and consume
/// helpers used by the per-statement parse functions.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over an already-tokenized statement.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Tokenizes `sql` and creates a parser over the result.
    pub fn new_with_sql(sql: &str) -> Result<Self, ParserError> {
        let tokens = Lexer::new(sql).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Returns a reference to the next token without consuming it.
    pub fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns a reference to the token `offset` positions ahead of the
    /// cursor, without consuming anything.
    pub fn peek_nth(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// True once every token has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes the next token if it equals `expected`.
    pub fn next_token_if_eq(&mut self, expected: &Token) -> bool {
        if self.peek_token() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next token, requiring it to equal `expected`.
    pub fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        if self.next_token_if_eq(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected, found)
        }
    }

    /// Consumes the next token if it is a [`Token::Word`] equal to `word`
    /// (case-sensitive, matching the grammar's bare-uppercase keywords).
    pub fn parse_word(&mut self, word: &str) -> bool {
        match self.peek_token() {
            Some(Token::Word(w)) if w == word => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes the next token, requiring it to be the word `word`.
    pub fn expect_word(&mut self, word: &str) -> Result<(), ParserError> {
        if self.parse_word(word) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(word, found)
        }
    }

    /// Consumes consecutive word tokens if they match `words` in order,
    /// otherwise consumes nothing.
    pub fn parse_words(&mut self, words: &[&str]) -> bool {
        for (i, word) in words.iter().enumerate() {
            match self.peek_nth(i) {
                Some(Token::Word(w)) if w == word => continue,
                _ => return false,
            }
        }
        self.pos += words.len();
        true
    }

    /// Consumes the next token if it is a [`Token::Word`], returning its text.
    pub fn parse_identifier(&mut self) -> Result<String, ParserError> {
        match self.next_token() {
            Some(Token::Word(w)) => Ok(w),
            found => self.expected("identifier", found),
        }
    }

    /// Parses a comma-separated list of one or more items using `f`.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, ParserError>,
    ) -> Result<Vec<T>, ParserError> {
        let mut values = vec![f(self)?];
        while self.next_token_if_eq(&Token::Comma) {
            values.push(f(self)?);
        }
        Ok(values)
    }

    /// Reports an unexpected token.
    pub fn expected<R>(
        &self,
        expected: impl Display,
        found: Option<impl Display>,
    ) -> Result<R, ParserError> {
        match found {
            Some(found) => parse_error(format!("Expected {expected}, found {found}")),
            None => parse_error(format!("Expected {expected}, but input ended")),
        }
    }
}
