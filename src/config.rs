//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Result, ServerError};

pub const DB_PATH_VAR: &str = "WAREHOUSE_DB_PATH";
pub const BIND_ADDR_VAR: &str = "WAREHOUSE_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "warehouse=debug,tower_http=debug";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join("warehouse").join("warehouse.db")
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.parse::<SocketAddr>().map_err(|e| {
            ServerError::Config(format!(
                "{} '{}' is not a socket address: {}",
                BIND_ADDR_VAR, addr, e
            ))
        })?;

        Ok(Self { db_path, bind_addr })
    }
}
