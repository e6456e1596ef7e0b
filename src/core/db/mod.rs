/// Database Infrastructure Module
///
/// Connection opening and pragma setup shared by the mapper's
/// convenience constructors.

pub mod connection;

pub use connection::{open, open_in_memory, open_with};
