//! # Alpha Terminal Configuration
//!
//! Layered settings for the journal: an optional TOML file, then environment
//! variables prefixed with `JOURNAL_` (sections separated by `__`, e.g.
//! `JOURNAL_ACCOUNT__GOAL_BALANCE=55000`). Every section has defaults, so an
//! empty configuration is valid.
//!
//! Account rules are deliberately *not* rejected here: a dashboard has to render
//! even when the account is only partially set up.

use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use rust_decimal::Decimal;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod scoring;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use scoring::{KpiTargets, ScoreWeights, ScoringConfig};
pub use settings::{
    LoggingSettings, ServerSettings, Settings, StorageBackend, StorageSettings,
};

/// Loads the application configuration from `path` (if it exists) and the environment.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("JOURNAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;
    tracing::debug!(path = %path.display(), backend = ?settings.storage.backend, "Configuration loaded.");

    Ok(settings)
}

/// Parses settings from TOML text. No environment layering is applied.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;

    validate(&settings)?;
    Ok(settings)
}

/// Rejects settings the analytics and storage layers cannot work with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let scoring = &settings.scoring;
    if scoring.weights.any_negative() {
        return Err(ConfigError::ValidationError(
            "scoring weights must not be negative".to_string(),
        ));
    }
    if scoring.profit_factor_scale <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "scoring.profit_factor_scale must be greater than zero".to_string(),
        ));
    }
    if scoring.consistency_per_trade < Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "scoring.consistency_per_trade must not be negative".to_string(),
        ));
    }

    let warning = settings.targets.drawdown_warning_utilization;
    if warning <= Decimal::ZERO || warning > Decimal::ONE {
        return Err(ConfigError::ValidationError(format!(
            "targets.drawdown_warning_utilization must be in (0, 1], got {warning}"
        )));
    }

    if settings.storage.backend == StorageBackend::Postgres
        && settings.storage.database_url().is_none()
    {
        return Err(ConfigError::ValidationError(
            "the postgres backend needs storage.database_url or DATABASE_URL".to_string(),
        ));
    }

    Ok(())
}
