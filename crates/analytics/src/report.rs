use crate::calendar::DailyPnl;
use chrono::NaiveDate;
use core_types::AccountConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows for one user, derived from their ledger.
///
/// This struct is the output of the `AnalyticsEngine` and the data transfer
/// object handed to every renderer (CLI tables, JSON API). It is recomputed on
/// every request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    // I. Trade counts
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,

    // II. Profitability
    pub net_pnl: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal, // magnitude, never negative
    pub current_balance: Decimal,
    pub win_rate_pct: Decimal,
    pub profit_factor: Decimal, // 0 when there are no losing trades
    pub average_win: Decimal,
    pub average_loss: Decimal, // magnitude, 0 when there are no losing trades

    // III. Equity and drawdown
    pub equity_curve: Vec<EquityPoint>,
    pub current_drawdown: Decimal,
    pub max_drawdown: Decimal,
    pub drawdown_utilization: Decimal,
    pub drawdown_status: DrawdownStatus,

    // IV. Objectives
    pub goal: GoalProgress,
    pub levels: RiskLevels,
    pub kpis: KpiStatus,

    // V. Presentation aggregates
    pub score: ScoreCard,
    pub daily_pnl: Vec<DailyPnl>,
}

/// Account state right after one trade, in date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub equity: Decimal,
    /// Highest equity seen so far, starting balance included.
    pub peak: Decimal,
}

impl EquityPoint {
    pub fn drawdown(&self) -> Decimal {
        self.peak - self.equity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawdownStatus {
    #[default]
    Healthy,
    /// Drawdown has used up the configured warning share of the limit.
    Warning,
    /// Drawdown has reached the limit.
    Breached,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_balance: Decimal,
    pub profit_target: Decimal,
    /// Share of the profit target achieved, in [0, 1].
    pub progress: Decimal,
    pub remaining: Decimal,
}

/// Horizontal guide lines drawn on the equity chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskLevels {
    pub liquidation_threshold: Decimal,
    pub goal_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiStatus {
    pub win_rate_on_target: bool,
    pub profit_factor_on_target: bool,
}

/// The five radar axes, each in [0, 100], and their weighted combination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    pub win_rate: Decimal,
    pub profit_factor: Decimal,
    pub risk_management: Decimal,
    pub consistency: Decimal,
    pub momentum: Decimal,
    pub overall: Decimal,
}

impl ScoreCard {
    /// Axis labels paired with their values, in radar order.
    pub fn axes(&self) -> [(&'static str, Decimal); 5] {
        [
            ("Win Rate", self.win_rate),
            ("Profit Factor", self.profit_factor),
            ("Risk Mgmt", self.risk_management),
            ("Consistency", self.consistency),
            ("Momentum", self.momentum),
        ]
    }
}

impl MetricsResult {
    /// Creates a zeroed-out result for `account`, as if no trade had been logged.
    pub fn new(account: &AccountConfig) -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            breakeven_trades: 0,
            net_pnl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            current_balance: account.starting_balance,
            win_rate_pct: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            equity_curve: Vec::new(),
            current_drawdown: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            drawdown_utilization: Decimal::ZERO,
            drawdown_status: DrawdownStatus::Healthy,
            goal: GoalProgress {
                goal_balance: account.goal_balance,
                ..GoalProgress::default()
            },
            levels: RiskLevels {
                liquidation_threshold: account.liquidation_threshold(),
                goal_balance: account.goal_balance,
            },
            kpis: KpiStatus::default(),
            score: ScoreCard::default(),
            daily_pnl: Vec::new(),
        }
    }

    /// Running balance after each trade, parallel to the date-ordered ledger.
    pub fn equity_series(&self) -> Vec<Decimal> {
        self.equity_curve.iter().map(|p| p.equity).collect()
    }

    /// Running maximum of the equity series.
    pub fn peak_series(&self) -> Vec<Decimal> {
        self.equity_curve.iter().map(|p| p.peak).collect()
    }
}
