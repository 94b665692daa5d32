use std::fmt;

/// A single lexical token of the tinysql grammar.
///
/// The grammar has no reserved-word list: keywords such as `SELECT` or
/// `WHERE` are tokenized as plain [`Token::Word`]s and recognized by the
/// parser from their text, exactly as unquoted table and column names are.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// An unquoted word: a keyword, identifier, qualified name (`t.col`), or
    /// wildcard (`*`, `t.*`).
    Word(String),
    /// An integer literal.
    Integer(i64),
    /// A real (floating point) literal.
    Real(f64),
    /// The text between a pair of single quotes, with `''` already unescaped
    /// to a single `'`.
    Text(String),
    /// The `NULL` keyword, folded into its own token at lex time.
    Null,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    SemiColon,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `!=`
    NotEq,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{w}"),
            Token::Integer(v) => write!(f, "{v}"),
            Token::Real(v) => write!(f, "{v}"),
            Token::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Token::Null => f.write_str("NULL"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::SemiColon => f.write_str(";"),
            Token::Eq => f.write_str("="),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::NotEq => f.write_str("!="),
            Token::Is => f.write_str("IS"),
            Token::IsNot => f.write_str("IS NOT"),
        }
    }
}
