//! Integration tests: full CRUD round-trips through a TableManager
//! against in-memory and file-backed databases.

use rusqlite::types::Value;
use tablemap::core::TableMapError;
use tablemap::{CmpOp, Condition, TableManager};

const PLAYERS_SCHEMA: &str = "
CREATE TABLE players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    score INTEGER NOT NULL DEFAULT 0,
    pos_x REAL NOT NULL DEFAULT 0.0,
    pos_y REAL NOT NULL DEFAULT 0.0
)";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn game_manager() -> TableManager {
    init_tracing();
    let mut manager = TableManager::open_in_memory("players").unwrap();
    manager.connection().execute(PLAYERS_SCHEMA, []).unwrap();
    manager.add_field('n', "name", "anonymous".to_string());
    manager.add_field('s', "score", 0i64);
    manager.add_field('x', "pos_x", 0.0f64);
    manager.add_field('y', "pos_y", 0.0f64);
    manager
}

#[test]
fn test_statement_shapes() {
    let mut manager = game_manager();

    insta::assert_snapshot!(
        manager.insert_statement(),
        @"INSERT INTO players (name, score, pos_x, pos_y) VALUES (?, ?, ?, ?)"
    );
    insta::assert_snapshot!(
        manager.delete_statement(),
        @"DELETE FROM players WHERE id = ?"
    );
    insta::assert_snapshot!(
        manager.read_statement("insy").unwrap(),
        @"SELECT id,name,score,pos_y FROM players"
    );
    insta::assert_snapshot!(
        manager.write_statement("xy").unwrap(),
        @"UPDATE players SET pos_x = ?, pos_y = ?"
    );
}

#[test]
fn test_full_crud_round_trip() {
    let mut manager = game_manager();

    let id = manager.create().unwrap();
    assert_eq!(id, 1);

    manager
        .write_into(
            &Condition::by_id(id),
            "nsx",
            &[
                Value::Text("alice".to_string()),
                Value::Integer(1200),
                Value::Real(3.5),
            ],
        )
        .unwrap();

    let values = manager.read(&Condition::by_id(id), "insxy").unwrap();
    assert_eq!(
        values,
        vec![
            Value::Integer(1),
            Value::Text("alice".to_string()),
            Value::Integer(1200),
            Value::Real(3.5),
            Value::Real(0.0),
        ]
    );

    manager.delete(id).unwrap();
    let gone = manager.read(&Condition::by_id(id), "i");
    assert!(matches!(
        gone,
        Err(TableMapError::Database(
            rusqlite::Error::QueryReturnedNoRows
        ))
    ));
}

#[test]
fn test_read_by_non_identifier_condition() {
    let mut manager = game_manager();

    let id = manager.create().unwrap();
    manager
        .write_into(
            &Condition::by_id(id),
            "ns",
            &[Value::Text("bob".to_string()), Value::Integer(64)],
        )
        .unwrap();

    let cond = Condition::eq("name", "bob".to_string()).and("score", CmpOp::Ge, 10i64);
    let values = manager.read(&cond, "is").unwrap();
    assert_eq!(values[0], Value::Integer(id));
    assert_eq!(values[1], Value::Integer(64));
}

#[test]
fn test_read_into_fills_destinations_positionally() {
    let mut manager = game_manager();
    let id = manager.create().unwrap();

    let mut dest = vec![Value::Null; 2];
    manager
        .read_into(&Condition::by_id(id), "sn", &mut dest)
        .unwrap();

    assert_eq!(dest[0], Value::Integer(0));
    assert_eq!(dest[1], Value::Text("anonymous".to_string()));
}

#[test]
fn test_multiple_creates_assign_distinct_ids() {
    let mut manager = game_manager();

    let first = manager.create().unwrap();
    let second = manager.create().unwrap();
    let third = manager.create().unwrap();

    assert!(first < second && second < third);

    manager.delete(second).unwrap();
    assert!(manager.read(&Condition::by_id(first), "i").is_ok());
    assert!(manager.read(&Condition::by_id(third), "i").is_ok());
    assert!(manager.read(&Condition::by_id(second), "i").is_err());
}

#[test]
fn test_file_backed_database_persists_across_managers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.db");

    let id = {
        let mut manager = TableManager::open(&path, "players").unwrap();
        manager.connection().execute(PLAYERS_SCHEMA, []).unwrap();
        manager.add_field('n', "name", "persisted".to_string());
        let id = manager.create().unwrap();
        manager.close().unwrap();
        id
    };

    let mut reopened = TableManager::open(&path, "players").unwrap();
    reopened.add_field('n', "name", "persisted".to_string());

    let values = reopened.read(&Condition::by_id(id), "n").unwrap();
    assert_eq!(values[0], Value::Text("persisted".to_string()));
}

#[test]
fn test_constraint_violation_propagates_unchanged() {
    let mut manager = TableManager::open_in_memory("players").unwrap();
    manager
        .connection()
        .execute(
            "CREATE TABLE players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )
        .unwrap();
    manager.add_field('n', "name", "dup".to_string());

    manager.create().unwrap();
    let result = manager.create();
    assert!(matches!(result, Err(TableMapError::Database(_))));
}

#[test]
fn test_cached_statements_survive_repeated_use() {
    let mut manager = game_manager();

    // Same key-string, same text, across interleaved executions
    let before = manager.read_statement("ns").unwrap().to_string();
    let id = manager.create().unwrap();
    manager.read(&Condition::by_id(id), "ns").unwrap();
    let after = manager.read_statement("ns").unwrap().to_string();
    assert_eq!(before, after);
}
