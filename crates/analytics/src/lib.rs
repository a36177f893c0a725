//! # Alpha Terminal Analytics Engine
//!
//! Turns a user's trade ledger into every number the dashboard shows: equity
//! curve, drawdown against the account limit, win/loss statistics, progress to
//! the payout goal, the five-axis composite score and the daily P&L calendar.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. Ledgers are handed in by a storage adapter and the
//!   `MetricsResult` is handed to a renderer.
//! - **Total Functions:** Every ratio has a defined value at its singularity
//!   (no trades, no losses, zero drawdown limit, goal equal to start), so a
//!   dashboard always renders.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: computes a `MetricsResult` from an `AccountConfig` and a ledger.
//! - `validate_account`: optional upstream check of the account rules.
//! - `daily_pnl` / `month_calendar`: calendar aggregation.
//! - `trade_log`: the history table, newest first.
//! - `PnlTone`: three-way colour hint for P&L figures.

// Declare the modules that constitute this crate.
pub mod calendar;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod report;
pub mod score;
pub mod tone;

// Re-export the key components to create a clean, public-facing API.
pub use calendar::{CalendarDay, DailyPnl, MonthCalendar, daily_pnl, month_calendar};
pub use engine::{AnalyticsEngine, validate_account};
pub use error::AnalyticsError;
pub use ledger::{sorted_by_date, trade_log};
pub use report::{
    DrawdownStatus, EquityPoint, GoalProgress, KpiStatus, MetricsResult, RiskLevels, ScoreCard,
};
pub use tone::PnlTone;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use core_types::{AccountConfig, Side, TradeRecord, UserId};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    /// A trade on `day` of January 2024.
    pub fn trade(day: u32, pnl: &str) -> TradeRecord {
        let pnl: Decimal = pnl.parse().unwrap();
        TradeRecord {
            id: Uuid::new_v4(),
            owner: UserId::new("tester").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            symbol: "NQ".to_string(),
            pnl,
            side: if pnl.is_sign_negative() { Side::Short } else { Side::Long },
            r_multiple: Decimal::ONE,
            setup: "Manual".to_string(),
            notes: "None".to_string(),
        }
    }

    pub fn account(starting_balance: Decimal, max_drawdown_limit: Decimal, goal_balance: Decimal) -> AccountConfig {
        AccountConfig {
            starting_balance,
            max_drawdown_limit,
            goal_balance,
        }
    }
}
