use crate::calendar;
use crate::error::AnalyticsError;
use crate::ledger::sorted_by_date;
use crate::report::{DrawdownStatus, EquityPoint, KpiStatus, MetricsResult};
use crate::score::{self, ScoreInputs};
use configuration::{KpiTargets, ScoringConfig};
use core_types::{AccountConfig, TradeRecord};
use rust_decimal::Decimal;

/// A stateless calculator deriving every dashboard metric from a trade ledger.
///
/// The engine only holds its tuning parameters; `compute` reads its arguments
/// and allocates a fresh result, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    scoring: ScoringConfig,
    targets: KpiTargets,
}

impl AnalyticsEngine {
    pub fn new(scoring: ScoringConfig, targets: KpiTargets) -> Self {
        Self { scoring, targets }
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `account` - The account rules (starting balance, drawdown limit, goal).
    /// * `ledger` - Every trade of one user, in any order.
    ///
    /// Total over all inputs: an empty ledger, a ledger without losses or a
    /// zero drawdown limit all produce a defined result.
    pub fn compute(&self, account: &AccountConfig, ledger: &[TradeRecord]) -> MetricsResult {
        let mut report = MetricsResult::new(account);
        let ordered = sorted_by_date(ledger);

        self.calculate_equity(account, &ordered, &mut report);
        self.calculate_profitability(&ordered, &mut report);
        self.calculate_drawdown(account, &mut report);
        self.calculate_goal(account, &mut report);

        report.kpis = KpiStatus {
            win_rate_on_target: report.win_rate_pct >= self.targets.win_rate_pct,
            profit_factor_on_target: report.profit_factor > self.targets.profit_factor,
        };
        report.score = score::composite(
            &self.scoring,
            ScoreInputs {
                win_rate_pct: report.win_rate_pct,
                profit_factor: report.profit_factor,
                drawdown_utilization: report.drawdown_utilization,
                total_trades: report.total_trades,
            },
        );
        report.daily_pnl = calendar::daily_pnl(ledger);

        tracing::debug!(
            trades = report.total_trades,
            net_pnl = %report.net_pnl,
            drawdown = %report.current_drawdown,
            "Metrics computed."
        );

        report
    }

    /// Builds the running balance and its running maximum, seeded with the starting balance.
    fn calculate_equity(
        &self,
        account: &AccountConfig,
        ordered: &[&TradeRecord],
        report: &mut MetricsResult,
    ) {
        let mut equity = account.starting_balance;
        let mut peak = account.starting_balance;
        let mut max_drawdown = Decimal::ZERO;

        report.equity_curve = Vec::with_capacity(ordered.len());
        for trade in ordered {
            equity += trade.pnl;
            peak = peak.max(equity);
            max_drawdown = max_drawdown.max(peak - equity);

            report.equity_curve.push(EquityPoint {
                date: trade.date,
                pnl: trade.pnl,
                equity,
                peak,
            });
        }

        report.current_balance = equity;
        report.max_drawdown = max_drawdown;
        report.current_drawdown = report
            .equity_curve
            .last()
            .map_or(Decimal::ZERO, EquityPoint::drawdown);
    }

    /// Partitions trades into wins and losses and derives the ratios.
    fn calculate_profitability(&self, ordered: &[&TradeRecord], report: &mut MetricsResult) {
        report.total_trades = ordered.len();

        for trade in ordered {
            report.net_pnl += trade.pnl;

            if trade.is_win() {
                report.gross_profit += trade.pnl;
                report.winning_trades += 1;
            } else if trade.is_loss() {
                report.gross_loss += trade.pnl.abs();
                report.losing_trades += 1;
            } else {
                report.breakeven_trades += 1;
            }
        }

        // --- Ratios ---
        if report.total_trades > 0 {
            report.win_rate_pct = Decimal::from(report.winning_trades)
                / Decimal::from(report.total_trades)
                * Decimal::ONE_HUNDRED;
        }

        if report.winning_trades > 0 {
            report.average_win = report.gross_profit / Decimal::from(report.winning_trades);
        }

        // Without losses the profit factor stays at its fallback of zero.
        // A ratio too large for a Decimal saturates at Decimal::MAX.
        if report.losing_trades > 0 {
            report.average_loss = report.gross_loss / Decimal::from(report.losing_trades);
            report.profit_factor = report
                .gross_profit
                .checked_div(report.gross_loss)
                .unwrap_or(Decimal::MAX);
        }
    }

    fn calculate_drawdown(&self, account: &AccountConfig, report: &mut MetricsResult) {
        let limit = account.max_drawdown_limit;
        if limit > Decimal::ZERO {
            report.drawdown_utilization = report
                .current_drawdown
                .checked_div(limit)
                .map_or(Decimal::ONE, |used| used.clamp(Decimal::ZERO, Decimal::ONE));
        }

        report.drawdown_status = if limit > Decimal::ZERO && report.current_drawdown >= limit {
            DrawdownStatus::Breached
        } else if limit > Decimal::ZERO
            && report.drawdown_utilization >= self.targets.drawdown_warning_utilization
        {
            DrawdownStatus::Warning
        } else {
            DrawdownStatus::Healthy
        };
    }

    fn calculate_goal(&self, account: &AccountConfig, report: &mut MetricsResult) {
        let target = account.profit_target();

        report.goal.profit_target = target;
        report.goal.remaining = (target - report.net_pnl).max(Decimal::ZERO);
        if target > Decimal::ZERO {
            // Overflow only happens far outside [0, 1]; the sign decides which end.
            report.goal.progress = match report.net_pnl.checked_div(target) {
                Some(progress) => progress.clamp(Decimal::ZERO, Decimal::ONE),
                None if report.net_pnl > Decimal::ZERO => Decimal::ONE,
                None => Decimal::ZERO,
            };
        }
    }
}

/// Checks the account rules the progress and drawdown metrics rely on.
///
/// The engine never calls this itself: metrics degrade to their defined
/// fallbacks instead. Callers that want to reject a setup upstream can.
pub fn validate_account(account: &AccountConfig) -> Result<(), AnalyticsError> {
    let mut problems = Vec::new();

    if account.goal_balance <= account.starting_balance {
        problems.push(format!(
            "goal_balance ({}) must be greater than starting_balance ({})",
            account.goal_balance, account.starting_balance
        ));
    }
    if account.max_drawdown_limit < Decimal::ZERO {
        problems.push(format!(
            "max_drawdown_limit ({}) must not be negative",
            account.max_drawdown_limit
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidConfiguration(problems.join("; ")))
    }
}
