use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tunable parameters of the five-axis composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Relative weight of each axis in the overall score.
    pub weights: ScoreWeights,
    /// Multiplier turning a profit factor into axis points (capped at 100).
    pub profit_factor_scale: Decimal,
    /// Axis points awarded per logged trade on the consistency axis (capped at 100).
    pub consistency_per_trade: Decimal,
    /// Fixed value of the momentum axis.
    pub momentum: Decimal,
}

/// Weights for the composite score. They do not need to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub win_rate: Decimal,
    pub profit_factor: Decimal,
    pub risk_management: Decimal,
    pub consistency: Decimal,
    pub momentum: Decimal,
}

impl ScoreWeights {
    pub fn total(&self) -> Decimal {
        self.win_rate + self.profit_factor + self.risk_management + self.consistency + self.momentum
    }

    pub(crate) fn any_negative(&self) -> bool {
        [
            self.win_rate,
            self.profit_factor,
            self.risk_management,
            self.consistency,
            self.momentum,
        ]
        .iter()
        .any(|w| *w < Decimal::ZERO)
    }
}

/// Dashboard objectives the KPIs are compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiTargets {
    /// Win rate (in percent) that counts as on target.
    pub win_rate_pct: Decimal,
    /// Profit factor that must be exceeded to count as on target.
    pub profit_factor: Decimal,
    /// Fraction of the drawdown limit at which the account is flagged.
    pub drawdown_warning_utilization: Decimal,
}

// --- Default Implementations ---
// An omitted `[scoring]` or `[targets]` section falls back to these.

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            profit_factor_scale: dec!(30),
            consistency_per_trade: dec!(10),
            momentum: dec!(80),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            win_rate: dec!(0.2),
            profit_factor: dec!(0.2),
            risk_management: dec!(0.2),
            consistency: dec!(0.2),
            momentum: dec!(0.2),
        }
    }
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self {
            win_rate_pct: dec!(60),
            profit_factor: dec!(1.5),
            drawdown_warning_utilization: dec!(0.6),
        }
    }
}
