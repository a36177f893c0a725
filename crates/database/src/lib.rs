//! # Alpha Terminal Database Crate
//!
//! Storage adapters for the trade ledger. The rest of the application only sees
//! the `TradeStore` capability; which adapter backs it is a configuration choice.
//!
//! ## Architectural Principles
//!
//! - **Adapter Layer:** Each backend hides its medium (JSON file, memory,
//!   PostgreSQL) behind the same read/append interface.
//! - **Append Only:** Trades are immutable once logged. There is no update or
//!   delete path and no transaction or conflict handling.
//! - **Boundary Mapping:** `load_ledger` turns "nothing stored" into an empty
//!   ledger so the analytics engine only ever sees well-typed input.
//!
//! ## Public API
//!
//! - `TradeStore`: the read/append capability.
//! - `JsonFileStore`, `InMemoryStore`, `DbRepository`: the adapters.
//! - `open_store`: builds the adapter selected in `StorageSettings`.
//! - `connect` / `run_migrations`: PostgreSQL pool setup.
//! - `DbError`: the specific error types that can be returned from this crate.

use configuration::{StorageBackend, StorageSettings};
use std::sync::Arc;

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod json_store;
pub mod memory_store;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use json_store::JsonFileStore;
pub use memory_store::InMemoryStore;
pub use repository::DbRepository;
pub use store::{TradeStore, load_ledger};

/// Opens the storage adapter selected by `settings`.
///
/// The PostgreSQL backend connects and applies pending migrations first.
pub async fn open_store(settings: &StorageSettings) -> Result<Arc<dyn TradeStore>, DbError> {
    match settings.backend {
        StorageBackend::Json => {
            tracing::info!(path = %settings.path.display(), "Using JSON ledger file.");
            Ok(Arc::new(JsonFileStore::new(&settings.path)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory ledger; trades are lost on exit.");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = settings.database_url().ok_or_else(|| {
                DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string())
            })?;
            let pool = connect(&url).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(DbRepository::new(pool)))
        }
    }
}
