use crate::core::{Result, TableMapError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub pragmas: Option<PragmasConfig>,
}

/// Database location configuration.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

/// SQLite pragma tuning applied after the connection is opened.
#[derive(Debug, Deserialize)]
pub struct PragmasConfig {
    pub foreign_keys: Option<bool>,
    pub journal_mode: Option<String>,
    pub cache_size: Option<i64>,
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// let config = tablemap::config::load_config("tablemap.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| TableMapError::Config(e.to_string()))
}
