use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A scalar SQL value: an integer, a real, a text string, or null.
///
/// `Value` plays double duty as both the literal produced by the parser and
/// the runtime cell stored in a table row — the grammar never needs a
/// separate typed-literal representation, so one type serves both.
#[derive(Clone, Debug)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit floating point number.
    Real(f64),
    /// A UTF-8 text string.
    Text(String),
    /// SQL `NULL`.
    Null,
}

impl Value {
    /// Returns true if this value is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The declared-type name this value would satisfy, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Null => "NULL",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Null => f.write_str("NULL"),
        }
    }
}

// `Value` needs structural equality and hashing so that rows (tuples of
// `Value`) can be deduplicated for `SELECT DISTINCT`. This is plain
// structural equality, independent of SQL's three-valued `WHERE` semantics
// (where `NULL = NULL` is unknown, not true) — the engine's `WHERE`
// evaluator implements that separately and does not rely on this impl.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Integer(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Value::Real(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Value::Text(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Value::Null => 3u8.hash(state),
        }
    }
}

/// Same-type ordering, used by natural (non-collated) `ORDER BY` and by the
/// `<`/`>` `WHERE` operators. Cross-type comparisons and any comparison
/// involving `NULL` return `None`; spec §3 leaves cross-type comparison
/// undefined, and SQL treats every comparison against `NULL` as unknown.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_and_escapes_text() {
        assert_eq!(Value::Text("O'Brien".to_string()).to_string(), "'O''Brien'");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn cross_type_comparison_is_none() {
        assert_eq!(
            Value::Integer(1).partial_cmp(&Value::Text("1".to_string())),
            None
        );
        assert_eq!(Value::Null.partial_cmp(&Value::Null), None);
    }

    #[test]
    fn distinct_rows_hash_and_eq_structurally() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        seen.insert(vec![Value::Integer(1), Value::Text("a".to_string())]);
        assert!(!seen.insert(vec![Value::Integer(1), Value::Text("a".to_string())]));
        assert!(seen.insert(vec![Value::Integer(2), Value::Text("a".to_string())]));
    }
}
