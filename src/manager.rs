//! The table manager: one connection, one table, one field map, and the
//! memoized statements that tie them together.

use crate::condition::Condition;
use crate::config::Config;
use crate::core::db::connection;
use crate::core::{Result, TableMapError};
use crate::fields::FieldMap;
use crate::statement::StatementCache;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, error};

/// Maps one database table to a set of single-character field keys and
/// executes generated CRUD statements against it.
///
/// The manager owns its connection for its whole lifetime and assumes
/// single-threaded use; every cache-touching operation takes `&mut self`,
/// so exclusive access is enforced at compile time.
pub struct TableManager {
    conn: Connection,
    table: String,
    fields: FieldMap,
    cache: StatementCache,
}

impl TableManager {
    /// Wraps an already-open connection. The table name is fixed for the
    /// manager's lifetime.
    pub fn new(conn: Connection, table: &str) -> Self {
        TableManager {
            conn,
            table: table.to_string(),
            fields: FieldMap::new(),
            cache: StatementCache::new(),
        }
    }

    /// Opens a file-backed SQLite database and wraps it.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `table` - Name of the table this manager addresses
    ///
    /// # Returns
    ///
    /// A ready manager, or `TableMapError::Database` if opening fails.
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self> {
        Ok(TableManager::new(connection::open(path)?, table))
    }

    /// Opens an in-memory SQLite database and wraps it.
    pub fn open_in_memory(table: &str) -> Result<Self> {
        Ok(TableManager::new(connection::open_in_memory()?, table))
    }

    /// Opens the database named by a loaded [`Config`] and wraps it.
    pub fn open_with(config: &Config, table: &str) -> Result<Self> {
        Ok(TableManager::new(connection::open_with(config)?, table))
    }

    /// The table this manager addresses.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The underlying connection, e.g. for schema setup.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Registers a field under `key`, overwriting any previous entry.
    ///
    /// Invalidates every memoized statement derived from the field map.
    pub fn add_field(&mut self, key: char, column: &str, default: impl Into<Value>) {
        self.fields.insert(key, column, default);
        self.cache.invalidate();
    }

    /// Removes the field under `key`; unknown keys are a no-op.
    ///
    /// Invalidates every memoized statement derived from the field map.
    pub fn remove_field(&mut self, key: char) {
        self.fields.remove(key);
        self.cache.invalidate();
    }

    /// The memoized insert statement for the current field map.
    pub fn insert_statement(&mut self) -> &str {
        self.cache.insert_for(&self.table, &self.fields)
    }

    /// The memoized delete statement. Built once per manager lifetime.
    pub fn delete_statement(&mut self) -> &str {
        self.cache.delete_for(&self.table)
    }

    /// The memoized read statement for `keys` (no WHERE clause; that is
    /// appended per call from a [`Condition`]).
    pub fn read_statement(&mut self, keys: &str) -> Result<&str> {
        self.cache.read_for(&self.table, &self.fields, keys)
    }

    /// The memoized write statement for `keys` (no WHERE clause; that is
    /// appended per call from a [`Condition`]).
    pub fn write_statement(&mut self, keys: &str) -> Result<&str> {
        self.cache.write_for(&self.table, &self.fields, keys)
    }

    /// Inserts a new row with every registered default bound in key
    /// order and returns the store-assigned row identifier.
    ///
    /// With an empty field map this executes the `DEFAULT VALUES` form,
    /// which succeeds or fails per the table's own column defaults.
    pub fn create(&mut self) -> Result<i64> {
        let sql = self.cache.insert_for(&self.table, &self.fields);
        let defaults: Vec<&Value> = self.fields.iter().map(|(_, f)| &f.default).collect();

        match self.conn.execute(sql, rusqlite::params_from_iter(defaults)) {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!("created row {} in {}", id, self.table);
                Ok(id)
            }
            Err(e) => {
                error!("insert into {} failed: {}", self.table, e);
                Err(e.into())
            }
        }
    }

    /// Deletes the row with the given identifier.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let sql = self.cache.delete_for(&self.table);
        debug!("delete from {}: id={}", self.table, id);
        self.conn.execute(sql, rusqlite::params![id])?;
        Ok(())
    }

    /// Reads exactly one row, copying each selected column into the
    /// corresponding `dest` slot positionally.
    ///
    /// # Arguments
    ///
    /// * `cond` - WHERE predicate selecting the row
    /// * `keys` - Key-string naming the columns to read; `i` resolves to
    ///   the identifier column
    /// * `dest` - One slot per key character, filled in order
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `dest` and `keys` disagree in length,
    /// `UnknownField` for an unregistered key, and the store's own error
    /// when no row matches.
    pub fn read_into(&mut self, cond: &Condition, keys: &str, dest: &mut [Value]) -> Result<()> {
        let wanted = keys.chars().count();
        if dest.len() != wanted {
            return Err(TableMapError::ShapeMismatch {
                expected: wanted,
                actual: dest.len(),
            });
        }

        let prefix = self.cache.read_for(&self.table, &self.fields, keys)?;
        let sql = format!("{} WHERE {}", prefix, cond.to_sql());
        debug!("read: {}", sql);

        let row_values = self.conn.query_row(
            &sql,
            rusqlite::params_from_iter(cond.values()),
            |row| {
                let mut values = Vec::with_capacity(wanted);
                for i in 0..wanted {
                    values.push(row.get::<_, Value>(i)?);
                }
                Ok(values)
            },
        )?;

        for (slot, value) in dest.iter_mut().zip(row_values) {
            *slot = value;
        }
        Ok(())
    }

    /// Reads exactly one row and returns the selected values without
    /// type coercion; each keeps the native scalar type the store
    /// returned.
    pub fn read(&mut self, cond: &Condition, keys: &str) -> Result<Vec<Value>> {
        let mut values = vec![Value::Null; keys.chars().count()];
        self.read_into(cond, keys, &mut values)?;
        Ok(values)
    }

    /// Updates the columns named by `keys` on every row matching `cond`,
    /// binding `values` positionally in key order.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `values` and `keys` disagree in length,
    /// `UnknownField` for an unregistered key, and the store's error for
    /// execution failures (e.g. constraint violations).
    pub fn write_into(&mut self, cond: &Condition, keys: &str, values: &[Value]) -> Result<()> {
        let wanted = keys.chars().count();
        if values.len() != wanted {
            return Err(TableMapError::ShapeMismatch {
                expected: wanted,
                actual: values.len(),
            });
        }

        let prefix = self.cache.write_for(&self.table, &self.fields, keys)?;
        let sql = format!("{} WHERE {}", prefix, cond.to_sql());
        debug!("write: {}", sql);

        let params = rusqlite::params_from_iter(values.iter().chain(cond.values()));
        match self.conn.execute(&sql, params) {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("update of {} failed: {}", self.table, e);
                Err(e.into())
            }
        }
    }

    /// Releases the held connection, surfacing a close failure.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| TableMapError::Database(e))
    }
}
