//! SQL statement generation and memoization.
//!
//! The builders in this module are pure string assembly: they never touch
//! the database. [`StatementCache`] memoizes their output so repeated
//! operations with the same shape reuse the same text. Every statement
//! kind is parameterized with `?` placeholders; values are bound at
//! execution time.

use crate::core::{Result, TableMapError};
use crate::fields::{FieldMap, ID_COLUMN, ID_KEY};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Builds `INSERT INTO <table> (<c1>, <c2>, ...) VALUES (?, ?, ...)`
/// with columns in field-key order.
///
/// An empty field map produces `INSERT INTO <table> DEFAULT VALUES`,
/// the form SQLite accepts for a row of nothing but defaults.
pub fn build_insert(table: &str, fields: &FieldMap) -> String {
    if fields.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table);
    }

    let columns: Vec<&str> = fields.iter().map(|(_, f)| f.column.as_str()).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

/// Builds `DELETE FROM <table> WHERE id = ?`.
pub fn build_delete(table: &str) -> String {
    format!("DELETE FROM {} WHERE {} = ?", table, ID_COLUMN)
}

/// Builds `SELECT <c1>,<c2>,... FROM <table>` for a key-string.
///
/// The reserved key [`ID_KEY`] resolves to the identifier column before
/// the field map is consulted; every other character must name a
/// registered field.
///
/// # Errors
///
/// Returns `TableMapError::UnknownField` for an unregistered key and
/// `TableMapError::Statement` for an empty key-string.
pub fn build_read(table: &str, fields: &FieldMap, keys: &str) -> Result<String> {
    if keys.is_empty() {
        return Err(TableMapError::Statement(
            "read key-string is empty".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(keys.len());
    for key in keys.chars() {
        if key == ID_KEY {
            columns.push(ID_COLUMN);
            continue;
        }
        match fields.get(key) {
            Some(field) => columns.push(field.column.as_str()),
            None => return Err(TableMapError::UnknownField(key)),
        }
    }

    Ok(format!("SELECT {} FROM {}", columns.join(","), table))
}

/// Builds `UPDATE <table> SET <c1> = ?, <c2> = ?, ...` for a key-string,
/// placeholders in left-to-right key order.
///
/// Write key-strings resolve through the field map only; the reserved
/// identifier key is not writable unless explicitly registered.
///
/// # Errors
///
/// Returns `TableMapError::UnknownField` for an unregistered key and
/// `TableMapError::Statement` for an empty key-string.
pub fn build_write(table: &str, fields: &FieldMap, keys: &str) -> Result<String> {
    if keys.is_empty() {
        return Err(TableMapError::Statement(
            "write key-string is empty".to_string(),
        ));
    }

    let mut assignments = Vec::with_capacity(keys.len());
    for key in keys.chars() {
        let field = fields
            .get(key)
            .ok_or(TableMapError::UnknownField(key))?;
        assignments.push(format!("{} = ?", field.column));
    }

    Ok(format!("UPDATE {} SET {}", table, assignments.join(", ")))
}

/// Memoized statement text for one table.
///
/// The insert slot and the read/write maps are derived from the field
/// map and must be dropped on any field mutation via [`invalidate`].
/// The delete slot depends only on the table name, which is immutable,
/// so it is built once and kept for the cache's lifetime.
///
/// [`invalidate`]: StatementCache::invalidate
#[derive(Debug, Default)]
pub struct StatementCache {
    insert: Option<String>,
    delete: Option<String>,
    reads: HashMap<String, String>,
    writes: HashMap<String, String>,
}

impl StatementCache {
    pub fn new() -> Self {
        StatementCache::default()
    }

    /// Drops every statement derived from the field map.
    pub fn invalidate(&mut self) {
        self.insert = None;
        self.reads.clear();
        self.writes.clear();
    }

    /// Returns the memoized insert statement, building it on first use.
    pub fn insert_for(&mut self, table: &str, fields: &FieldMap) -> &str {
        self.insert.get_or_insert_with(|| {
            let sql = build_insert(table, fields);
            debug!("built insert statement: {}", sql);
            sql
        })
    }

    /// Returns the memoized delete statement, building it on first use.
    pub fn delete_for(&mut self, table: &str) -> &str {
        self.delete.get_or_insert_with(|| {
            let sql = build_delete(table);
            debug!("built delete statement: {}", sql);
            sql
        })
    }

    /// Returns the memoized read statement for `keys`, building it on
    /// first use.
    pub fn read_for(&mut self, table: &str, fields: &FieldMap, keys: &str) -> Result<&str> {
        match self.reads.entry(keys.to_string()) {
            Entry::Occupied(slot) => Ok(slot.into_mut().as_str()),
            Entry::Vacant(slot) => {
                let sql = build_read(table, fields, keys)?;
                debug!("built read statement for '{}': {}", keys, sql);
                Ok(slot.insert(sql).as_str())
            }
        }
    }

    /// Returns the memoized write statement for `keys`, building it on
    /// first use.
    pub fn write_for(&mut self, table: &str, fields: &FieldMap, keys: &str) -> Result<&str> {
        match self.writes.entry(keys.to_string()) {
            Entry::Occupied(slot) => Ok(slot.into_mut().as_str()),
            Entry::Vacant(slot) => {
                let sql = build_write(table, fields, keys)?;
                debug!("built write statement for '{}': {}", keys, sql);
                Ok(slot.insert(sql).as_str())
            }
        }
    }
}
