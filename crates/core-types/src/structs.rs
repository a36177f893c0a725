use crate::enums::Side;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies the owner of a ledger. Supplied by whoever authenticated the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput(
                "user".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The funded-account rules every metric is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Equity the account started with.
    pub starting_balance: Decimal,
    /// Absolute distance below peak equity allowed before the account is breached.
    pub max_drawdown_limit: Decimal,
    /// Equity at which the payout objective is reached.
    pub goal_balance: Decimal,
}

impl AccountConfig {
    /// The equity level at which the account would be liquidated.
    pub fn liquidation_threshold(&self) -> Decimal {
        self.starting_balance - self.max_drawdown_limit
    }

    /// Profit still required, measured from the starting balance, to reach the goal.
    pub fn profit_target(&self) -> Decimal {
        self.goal_balance - self.starting_balance
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            starting_balance: dec!(50000),
            max_drawdown_limit: dec!(2500),
            goal_balance: dec!(54100),
        }
    }
}

/// A single logged trade. Created once at submission and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub owner: UserId,
    pub date: NaiveDate,
    pub symbol: String,
    pub pnl: Decimal,
    pub side: Side,
    #[serde(default = "default_r_multiple")]
    pub r_multiple: Decimal,
    #[serde(default = "default_setup")]
    pub setup: String,
    #[serde(default = "default_notes")]
    pub notes: String,
}

impl TradeRecord {
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}

/// The fields a user fills in when logging a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub date: NaiveDate,
    pub symbol: String,
    pub pnl: Decimal,
    pub side: Side,
    #[serde(default)]
    pub r_multiple: Option<Decimal>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTrade {
    /// Validates the submission and stamps it with a fresh id and its owner.
    pub fn into_record(self, owner: &UserId) -> Result<TradeRecord, CoreError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::InvalidInput(
                "symbol".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(TradeRecord {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            date: self.date,
            symbol,
            pnl: self.pnl,
            side: self.side,
            r_multiple: self.r_multiple.unwrap_or_else(default_r_multiple),
            setup: non_blank(self.setup).unwrap_or_else(default_setup),
            notes: non_blank(self.notes).unwrap_or_else(default_notes),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_r_multiple() -> Decimal {
    Decimal::ONE
}

fn default_setup() -> String {
    "Manual".to_string()
}

fn default_notes() -> String {
    "None".to_string()
}
