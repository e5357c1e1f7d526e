//! Integration tests that execute split statements against SQLite.
//!
//! Each statement produced by the splitter is executed on its own through
//! rusqlite, the way an evolution runner applies a script.

use rusqlite::Connection;
use sql_statement_splitter::{Delimiters, Error, split};

const UPS: &str = "
-- !Ups

CREATE TABLE users (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL -- display name
);

/*
 * Seed data.
 */
INSERT INTO users (id, name) VALUES (1, 'O''Brien; Jr.');
INSERT INTO users (id, name) VALUES (2, '-- not a comment');
INSERT INTO users (id, name) VALUES (3, 'multi
line');
";

fn apply(conn: &Connection, script: &str) -> Result<usize, Error> {
    let statements = split(script, &Delimiters::default())?;
    for statement in &statements {
        conn.execute_batch(statement)
            .unwrap_or_else(|err| panic!("Failed to execute {statement:?}: {err}"));
    }
    Ok(statements.len())
}

fn names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM users ORDER BY id")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn test_apply_ups() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(apply(&conn, UPS), Ok(4));
    assert_eq!(
        names(&conn),
        ["O'Brien; Jr.", "-- not a comment", "multi\nline"]
    );
}

#[test]
fn test_apply_downs() {
    let conn = Connection::open_in_memory().unwrap();
    apply(&conn, UPS).unwrap();
    assert_eq!(apply(&conn, "-- !Downs\nDROP TABLE users;"), Ok(1));

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn test_broken_script_executes_nothing() {
    let conn = Connection::open_in_memory().unwrap();
    let script = "CREATE TABLE t (id INTEGER); /* unterminated";
    assert!(matches!(
        apply(&conn, script),
        Err(Error::UnterminatedBlockComment { .. })
    ));

    let tables: i64 = conn
        .query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tables, 0);
}
