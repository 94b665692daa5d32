use tinysql::ast::Value;

#[test]
fn insert_then_select_round_trips_a_row() {
    let mut conn = tinysql::connect("round-trip.db");
    conn.execute("CREATE TABLE t (a INTEGER, b TEXT);").unwrap();
    conn.execute("INSERT INTO t VALUES (1, 'x');").unwrap();
    let rows = conn.execute("SELECT * FROM t;").unwrap();
    assert_eq!(rows, vec![vec![Value::Integer(1), Value::Text("x".to_string())]]);
}

#[test]
fn drop_table_if_exists_is_idempotent_through_the_facade() {
    let mut conn = tinysql::connect("idempotent.db");
    conn.execute("DROP TABLE IF EXISTS nonexistent;").unwrap();
    conn.execute("DROP TABLE IF EXISTS nonexistent;").unwrap();
}

#[test]
fn executemany_substitutes_placeholders_textually() {
    let mut conn = tinysql::connect("executemany.db");
    conn.execute("CREATE TABLE t (name TEXT, age INTEGER);").unwrap();
    conn.executemany(
        "INSERT INTO t VALUES (?, ?);",
        &[
            vec![Value::Text("Ann".to_string()), Value::Integer(20)],
            vec![Value::Text("Bo".to_string()), Value::Integer(19)],
        ],
    )
    .unwrap();

    let rows = conn.execute("SELECT * FROM t ORDER BY age;").unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Value::Text("Bo".to_string()), Value::Integer(19)],
            vec![Value::Text("Ann".to_string()), Value::Integer(20)],
        ]
    );
}

#[test]
fn commit_publishes_writes_for_later_connections() {
    let registry = tinysql::Registry::new();
    let mut writer = registry.connect("shared.db");
    writer.execute("CREATE TABLE t (a INTEGER);").unwrap();
    writer.execute("BEGIN IMMEDIATE TRANSACTION;").unwrap();
    writer.execute("INSERT INTO t VALUES (42);").unwrap();
    writer.execute("COMMIT TRANSACTION;").unwrap();

    let mut reader = registry.connect("shared.db");
    let rows = reader.execute("SELECT * FROM t;").unwrap();
    assert_eq!(rows, vec![vec![Value::Integer(42)]]);
}
