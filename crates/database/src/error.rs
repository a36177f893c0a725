use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to access the ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("A stored trade could not be read: {0}")]
    MalformedRecord(String),

    #[error("The submitted trade is invalid: {0}")]
    InvalidTrade(#[from] core_types::CoreError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}
