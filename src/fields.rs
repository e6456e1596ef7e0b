//! Field registry mapping single-character keys to table columns.

use rusqlite::types::Value;
use std::collections::BTreeMap;

/// Key reserved for the row identifier in read key-strings.
pub const ID_KEY: char = 'i';

/// Column name the reserved key resolves to.
pub const ID_COLUMN: &str = "id";

/// One registered column: its name and the default value bound when a
/// new row is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub column: String,
    pub default: Value,
}

/// Ordered map from field key to [`Field`].
///
/// Iteration order is sorted by key, so every statement generated from
/// the same field set is byte-identical regardless of registration
/// order.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: BTreeMap<char, Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        FieldMap {
            fields: BTreeMap::new(),
        }
    }

    /// Registers a field under `key`, overwriting any previous entry.
    pub fn insert(&mut self, key: char, column: &str, default: impl Into<Value>) {
        self.fields.insert(
            key,
            Field {
                column: column.to_string(),
                default: default.into(),
            },
        );
    }

    /// Removes the field under `key`. Unknown keys are a no-op.
    pub fn remove(&mut self, key: char) {
        self.fields.remove(&key);
    }

    pub fn get(&self, key: char) -> Option<&Field> {
        self.fields.get(&key)
    }

    /// Iterates fields in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Field)> {
        self.fields.iter().map(|(k, f)| (*k, f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
