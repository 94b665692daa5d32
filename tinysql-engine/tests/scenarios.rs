use tinysql_ast::Value;
use tinysql_engine::{EngineError, Registry};

fn rows_of(row: &[Value]) -> Vec<Value> {
    row.to_vec()
}

#[test]
fn aggregate_with_where_and_order_by() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");

    conn.execute("CREATE TABLE students (name TEXT, grade REAL, room INTEGER);")
        .unwrap();
    let rows = [
        ("Josh", 3.5, 480),
        ("Tyler", 2.5, 480),
        ("Tosh", 4.5, 450),
        ("Losh", 3.2, 450),
        ("Grant", 3.3, 480),
        ("Emily", 2.25, 450),
        ("James", 2.25, 450),
    ];
    for (name, grade, room) in rows {
        conn.execute(&format!(
            "INSERT INTO students VALUES ('{name}', {grade}, {room});"
        ))
        .unwrap();
    }

    // Filtered rows are Tyler(2.5) and Tosh(4.5); max(name) is a plain
    // lexicographic string max, so 'Tyler' > 'Tosh' wins here.
    let result = conn
        .execute("SELECT min(grade), max(name) FROM students WHERE name > 'T' ORDER BY grade, name;")
        .unwrap();
    assert_eq!(
        result,
        vec![rows_of(&[Value::Real(2.5), Value::Text("Tyler".to_string())])]
    );
}

#[test]
fn default_value_fills_partial_insert() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");

    conn.execute("CREATE TABLE t (a INTEGER, b INTEGER DEFAULT 7);")
        .unwrap();
    conn.execute("INSERT INTO t (a) VALUES (1);").unwrap();

    let result = conn.execute("SELECT * FROM t;").unwrap();
    assert_eq!(result, vec![rows_of(&[Value::Integer(1), Value::Integer(7)])]);
}

#[test]
fn exclusive_transaction_blocks_other_connections() {
    let registry = Registry::new();
    let mut setup = registry.connect("db");
    setup.execute("CREATE TABLE t (a INTEGER);").unwrap();

    let mut c1 = registry.connect("db");
    let mut c2 = registry.connect("db");

    c1.execute("BEGIN EXCLUSIVE TRANSACTION;").unwrap();
    let err = c2.execute("SELECT * FROM t;");
    assert!(err.is_err());
}

#[test]
fn rollback_discards_writes() {
    let registry = Registry::new();
    let mut setup = registry.connect("db");
    setup.execute("CREATE TABLE t (a INTEGER);").unwrap();

    let mut c1 = registry.connect("db");
    c1.execute("BEGIN TRANSACTION;").unwrap();
    c1.execute("INSERT INTO t VALUES (1);").unwrap();
    c1.execute("ROLLBACK TRANSACTION;").unwrap();

    let mut c2 = registry.connect("db");
    let result = c2.execute("SELECT * FROM t;").unwrap();
    assert!(result.is_empty());
}

#[test]
fn left_outer_join_fills_unmatched_rows_with_null() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");

    conn.execute("CREATE TABLE a (id INTEGER, name TEXT);").unwrap();
    conn.execute("CREATE TABLE b (id INTEGER, score INTEGER);").unwrap();
    conn.execute("INSERT INTO a VALUES (1, 'x');").unwrap();
    conn.execute("INSERT INTO a VALUES (2, 'y');").unwrap();
    conn.execute("INSERT INTO b VALUES (1, 90);").unwrap();

    let result = conn
        .execute("SELECT a.name, b.score FROM a LEFT OUTER JOIN b ON a.id = b.id;")
        .unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.contains(&rows_of(&[Value::Text("x".to_string()), Value::Integer(90)])));
    assert!(result.contains(&rows_of(&[Value::Text("y".to_string()), Value::Null])));
}

#[test]
fn null_aware_where_clauses() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");

    conn.execute("CREATE TABLE t (x INTEGER);").unwrap();
    conn.execute("INSERT INTO t VALUES (1);").unwrap();
    conn.execute("INSERT INTO t (x) VALUES (NULL);").unwrap();

    let is_null = conn.execute("SELECT * FROM t WHERE x IS NULL;").unwrap();
    assert_eq!(is_null, vec![rows_of(&[Value::Null])]);

    let eq_null = conn.execute("SELECT * FROM t WHERE x = NULL;").unwrap();
    assert!(eq_null.is_empty());
}

#[test]
fn drop_table_if_exists_is_idempotent() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");
    conn.execute("DROP TABLE IF EXISTS ghost;").unwrap();
    conn.execute("DROP TABLE IF EXISTS ghost;").unwrap();
}

#[test]
fn distinct_connections_on_different_filenames_are_isolated() {
    let registry = Registry::new();
    let mut a = registry.connect("a.db");
    let mut b = registry.connect("b.db");

    a.execute("CREATE TABLE t (x INTEGER);").unwrap();
    let err = b.execute("SELECT * FROM t;");
    assert!(err.is_err());
}

#[test]
fn unknown_column_type_is_a_type_error() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");
    let err = conn.execute("CREATE TABLE t (a FROBNICATE);").unwrap_err();
    assert!(matches!(err, EngineError::Type(_)));
}

#[test]
fn unrecognized_command_is_a_command_error() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");
    let err = conn.execute("FROBNICATE t;").unwrap_err();
    assert!(matches!(err, EngineError::Command(_)));
}

#[test]
fn collation_is_visible_to_a_later_statement_in_the_same_transaction() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");
    conn.execute("CREATE TABLE t (name TEXT);").unwrap();
    conn.execute("INSERT INTO t VALUES ('b');").unwrap();
    conn.execute("INSERT INTO t VALUES ('a');").unwrap();

    conn.execute("BEGIN TRANSACTION;").unwrap();
    conn.create_collation("reverse", std::sync::Arc::new(|a: &Value, b: &Value| {
        b.partial_cmp(a).map(|o| o as i32).unwrap_or(0)
    }));
    let result = conn
        .execute("SELECT name FROM t ORDER BY name COLLATE reverse;")
        .unwrap();
    conn.execute("COMMIT TRANSACTION;").unwrap();

    assert_eq!(
        result,
        vec![
            rows_of(&[Value::Text("b".to_string())]),
            rows_of(&[Value::Text("a".to_string())]),
        ]
    );
}

#[test]
fn view_rematerializes_on_every_access() {
    let registry = Registry::new();
    let mut conn = registry.connect("db");

    conn.execute("CREATE TABLE t (x INTEGER);").unwrap();
    conn.execute("CREATE VIEW v AS SELECT x FROM t;").unwrap();
    conn.execute("INSERT INTO t VALUES (1);").unwrap();

    let result = conn.execute("SELECT * FROM v;").unwrap();
    assert_eq!(result, vec![rows_of(&[Value::Integer(1)])]);
}
