/// Connection Management Module
///
/// This module opens SQLite connections for the mapper. Every
/// `TableManager` owns exactly one connection for its lifetime; there is
/// no process-global connection state.

use crate::config::Config;
use crate::core::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Opens a SQLite database at the specified path and applies the
/// standard pragmas.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
///
/// # Returns
///
/// An open `Connection` on success, `TableMapError::Database` on failure.
pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    debug!("opening database at {:?}", db_path.as_ref());
    let conn = Connection::open(db_path)?;

    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
    ",
    )?;

    Ok(conn)
}

/// Opens an in-memory SQLite database.
///
/// WAL journaling only applies to file databases, so the in-memory
/// connection keeps SQLite's default journal mode.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// Opens the database described by a loaded [`Config`], applying its
/// pragma overrides where present.
///
/// # Arguments
///
/// * `config` - Parsed configuration naming the database path and
///   optional pragma tuning
///
/// # Returns
///
/// An open `Connection` on success, `TableMapError::Database` on failure.
pub fn open_with(config: &Config) -> Result<Connection> {
    let conn = open(&config.database.path)?;

    if let Some(pragmas) = &config.pragmas {
        // execute_batch tolerates pragmas that echo their new value
        // (journal_mode does), unlike Connection::execute.
        let mut batch = String::new();
        if let Some(enabled) = pragmas.foreign_keys {
            batch.push_str(&format!(
                "PRAGMA foreign_keys = {};\n",
                if enabled { "ON" } else { "OFF" }
            ));
        }
        if let Some(mode) = &pragmas.journal_mode {
            batch.push_str(&format!("PRAGMA journal_mode = {};\n", mode));
        }
        if let Some(size) = pragmas.cache_size {
            batch.push_str(&format!("PRAGMA cache_size = {};\n", size));
        }
        conn.execute_batch(&batch)?;
    }

    Ok(conn)
}
