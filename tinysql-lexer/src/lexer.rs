use std::iter::Peekable;
use std::str::Chars;

use crate::{error::Location, LexerError, Token};

/// Tokenizes tinysql statement text into a flat token stream.
///
/// Keywords are case-sensitive and must be written in upper case (`SELECT`,
/// not `select`) — the lexer never folds case, matching the grammar it was
/// grounded on.
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    location: Location,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            iter: input.chars().peekable(),
            location: Location::default(),
        }
    }

    /// Returns the location the lexer is currently positioned at.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Tokenizes the entire input, producing tokens in source order.
    ///
    /// Whitespace is consumed and never produces a token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        self.skip_whitespace();
        match self.iter.peek() {
            None => Ok(None),
            Some(&ch) => {
                if self.matches_literal("IS NOT") {
                    self.advance_by(6);
                    return Ok(Some(Token::IsNot));
                }
                if self.matches_literal("IS") {
                    self.advance_by(2);
                    return Ok(Some(Token::Is));
                }
                if self.matches_literal("!=") {
                    self.advance_by(2);
                    return Ok(Some(Token::NotEq));
                }
                match ch {
                    '(' => {
                        self.next_char();
                        Ok(Some(Token::LeftParen))
                    }
                    ')' => {
                        self.next_char();
                        Ok(Some(Token::RightParen))
                    }
                    ',' => {
                        self.next_char();
                        Ok(Some(Token::Comma))
                    }
                    ';' => {
                        self.next_char();
                        Ok(Some(Token::SemiColon))
                    }
                    '=' => {
                        self.next_char();
                        Ok(Some(Token::Eq))
                    }
                    '<' => {
                        self.next_char();
                        Ok(Some(Token::Lt))
                    }
                    '>' => {
                        self.next_char();
                        Ok(Some(Token::Gt))
                    }
                    ch if is_word_start(ch) => Ok(Some(self.tokenize_word())),
                    '\'' => self.tokenize_text().map(Some),
                    ch if ch.is_ascii_digit() => Ok(Some(self.tokenize_number())),
                    other => self.lex_error(format!("Unexpected character '{other}'")),
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.iter.peek(), Some(ch) if ch.is_whitespace()) {
            self.next_char();
        }
    }

    fn matches_literal(&self, literal: &str) -> bool {
        let mut peek = self.iter.clone();
        for expected in literal.chars() {
            match peek.next() {
                Some(ch) if ch == expected => continue,
                _ => return false,
            }
        }
        true
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.next_char();
        }
    }

    fn tokenize_word(&mut self) -> Token {
        let word = self.next_while(is_word_part);
        if word == "NULL" {
            Token::Null
        } else {
            Token::Word(word)
        }
    }

    fn tokenize_text(&mut self) -> Result<Token, LexerError> {
        self.next_char(); // opening quote
        let mut text = String::new();
        loop {
            match self.next_char() {
                None => return self.lex_error("Unterminated string literal"),
                Some('\'') => {
                    if self.iter.peek() == Some(&'\'') {
                        self.next_char();
                        text.push('\'');
                    } else {
                        break;
                    }
                }
                Some(ch) => text.push(ch),
            }
        }
        Ok(Token::Text(text))
    }

    fn tokenize_number(&mut self) -> Token {
        let whole = self.next_while(|ch| ch.is_ascii_digit());
        if self.iter.peek() == Some(&'.') {
            self.next_char();
            let frac = self.next_while(|ch| ch.is_ascii_digit());
            let real: f64 = format!("{whole}.{frac}").parse().unwrap_or(f64::NAN);
            Token::Real(real)
        } else {
            let value: i64 = whole.parse().unwrap_or_default();
            Token::Integer(value)
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        self.location.advance(ch);
        Some(ch)
    }

    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> String {
        let mut value = String::new();
        while let Some(&ch) = self.iter.peek() {
            if !predicate(ch) {
                break;
            }
            self.next_char();
            value.push(ch);
        }
        value
    }

    fn lex_error<R>(&self, message: impl Into<String>) -> Result<R, LexerError> {
        Err(self.location.into_error(message))
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '.' || ch == '*'
}

fn is_word_part(ch: char) -> bool {
    is_word_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! tokenize {
        ($input:expr, $expected:expr) => {{
            let mut lexer = Lexer::new($input);
            assert_eq!(lexer.tokenize(), $expected);
        }};
    }

    #[test]
    fn tokenizes_select_statement() {
        tokenize!(
            "SELECT * FROM students;",
            Ok(vec![
                Token::Word("SELECT".into()),
                Token::Word("*".into()),
                Token::Word("FROM".into()),
                Token::Word("students".into()),
                Token::SemiColon,
            ])
        );
    }

    #[test]
    fn tokenizes_qualified_wildcard_and_dotted_name() {
        tokenize!(
            "SELECT t.* FROM t",
            Ok(vec![
                Token::Word("SELECT".into()),
                Token::Word("t.*".into()),
                Token::Word("FROM".into()),
                Token::Word("t".into()),
            ])
        );
    }

    #[test]
    fn folds_null_keyword_to_its_own_token() {
        tokenize!("NULL", Ok(vec![Token::Null]));
    }

    #[test]
    fn disambiguates_integer_and_real() {
        tokenize!("42 3.14 5.", Ok(vec![
            Token::Integer(42),
            Token::Real(3.14),
            Token::Real(5.0),
        ]));
    }

    #[test]
    fn unescapes_doubled_quotes_in_text() {
        tokenize!("'O''Brien'", Ok(vec![Token::Text("O'Brien".into())]));
    }

    #[test]
    fn is_not_takes_priority_over_is() {
        tokenize!(
            "a IS NOT NULL",
            Ok(vec![
                Token::Word("a".into()),
                Token::IsNot,
                Token::Null,
            ])
        );
    }

    #[test]
    fn not_eq_and_single_char_operators() {
        tokenize!(
            "a != b, c < d > e = f",
            Ok(vec![
                Token::Word("a".into()),
                Token::NotEq,
                Token::Word("b".into()),
                Token::Comma,
                Token::Word("c".into()),
                Token::Lt,
                Token::Word("d".into()),
                Token::Gt,
                Token::Word("e".into()),
                Token::Eq,
                Token::Word("f".into()),
            ])
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Lexer::new("'abc");
        assert!(lexer.tokenize().is_err());
    }
}
