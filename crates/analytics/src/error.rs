use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid account configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid calendar period: {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },
}
