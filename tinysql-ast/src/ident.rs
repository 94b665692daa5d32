use std::fmt;

/// An unquoted SQL identifier, e.g. a table or column name.
///
/// tinysql's grammar never supports quoted identifiers, so unlike a
/// general-purpose SQL AST this carries no quote style.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Ident(pub String);

impl Ident {
    /// Creates a new identifier from anything string-like.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Ident {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
