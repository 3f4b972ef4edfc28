//! Process configuration read from environment variables.
//!
//! - `HOST` (default `127.0.0.1`) and `PORT` (default `3000`).
//! - `DATABASE_PATH`: SQLite file to store persons in. `:memory:` selects a
//!   private in-memory SQLite database; unset keeps everything in process
//!   memory.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const SQLITE_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    SqliteMemory,
    SqliteFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT `{value}`: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let storage = match get("DATABASE_PATH") {
            None => StorageConfig::Memory,
            Some(path) if path == SQLITE_MEMORY => StorageConfig::SqliteMemory,
            Some(path) => StorageConfig::SqliteFile(PathBuf::from(path)),
        };

        Ok(Self {
            host,
            port,
            storage,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_in_memory() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn reads_host_port_and_database() {
        let config = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_PATH", "data/persons.db"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(
            config.storage,
            StorageConfig::SqliteFile(PathBuf::from("data/persons.db"))
        );
    }

    #[test]
    fn memory_marker_selects_sqlite_memory() {
        let config = config(&[("DATABASE_PATH", ":memory:")]).unwrap();
        assert_eq!(config.storage, StorageConfig::SqliteMemory);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("PORT", " "), ("DATABASE_PATH", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid PORT `http`"));
    }
}
