use crate::scoring::{KpiTargets, ScoringConfig};
use core_types::AccountConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub account: AccountConfig,
    pub scoring: ScoringConfig,
    pub targets: KpiTargets,
    pub storage: StorageSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Which adapter holds the trade ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// A single JSON file holding every user's trades.
    #[default]
    Json,
    /// Process-local storage, lost on exit.
    Memory,
    /// A PostgreSQL `trades` table.
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Location of the ledger file for the `json` backend.
    pub path: PathBuf,
    /// Connection string for the `postgres` backend. Falls back to `DATABASE_URL`.
    pub database_url: Option<String>,
}

impl StorageSettings {
    /// Resolves the connection string, preferring the configured value over the environment.
    pub fn database_url(&self) -> Option<String> {
        let non_blank = |url: &String| !url.trim().is_empty();
        self.database_url
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var("DATABASE_URL").ok().filter(non_blank))
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: PathBuf::from("data/trades.json"),
            database_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for the daily rolling log file.
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: PathBuf::from("logs"),
            file_prefix: "alpha-terminal.log".to_string(),
        }
    }
}
