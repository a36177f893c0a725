use crate::report::ScoreCard;
use configuration::ScoringConfig;
use rust_decimal::Decimal;

/// Inputs of the composite score, taken from an otherwise finished report.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub win_rate_pct: Decimal,
    pub profit_factor: Decimal,
    pub drawdown_utilization: Decimal,
    pub total_trades: usize,
}

/// Scores each axis on a 0-100 scale and applies the configured weights.
pub fn composite(config: &ScoringConfig, inputs: ScoreInputs) -> ScoreCard {
    let hundred = Decimal::ONE_HUNDRED;

    let win_rate = inputs.win_rate_pct.clamp(Decimal::ZERO, hundred);
    let profit_factor = scaled_axis(inputs.profit_factor, config.profit_factor_scale);
    let utilization = inputs.drawdown_utilization.clamp(Decimal::ZERO, Decimal::ONE);
    let risk_management = hundred - utilization * hundred;
    let consistency = scaled_axis(Decimal::from(inputs.total_trades), config.consistency_per_trade);
    let momentum = config.momentum.clamp(Decimal::ZERO, hundred);

    let w = &config.weights;
    let total_weight = w.total();
    let overall = if total_weight > Decimal::ZERO {
        (win_rate * w.win_rate
            + profit_factor * w.profit_factor
            + risk_management * w.risk_management
            + consistency * w.consistency
            + momentum * w.momentum)
            / total_weight
    } else {
        Decimal::ZERO
    };

    ScoreCard {
        win_rate,
        profit_factor,
        risk_management,
        consistency,
        momentum,
        overall,
    }
}

/// `value * scale` clamped to [0, 100]. A product too large for a Decimal saturates.
fn scaled_axis(value: Decimal, scale: Decimal) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    match value.checked_mul(scale) {
        Some(score) => score.clamp(Decimal::ZERO, hundred),
        None if value.is_sign_negative() != scale.is_sign_negative() => Decimal::ZERO,
        None => hundred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::ScoreWeights;
    use rust_decimal_macros::dec;

    fn inputs(win_rate_pct: Decimal, profit_factor: Decimal, utilization: Decimal, trades: usize) -> ScoreInputs {
        ScoreInputs {
            win_rate_pct,
            profit_factor,
            drawdown_utilization: utilization,
            total_trades: trades,
        }
    }

    #[test]
    fn default_axes() {
        let card = composite(&ScoringConfig::default(), inputs(dec!(50), dec!(2), dec!(0.25), 4));

        assert_eq!(card.win_rate, dec!(50));
        assert_eq!(card.profit_factor, dec!(60));
        assert_eq!(card.risk_management, dec!(75));
        assert_eq!(card.consistency, dec!(40));
        assert_eq!(card.momentum, dec!(80));
        // Equal weights: plain average of the five axes.
        assert_eq!(card.overall, dec!(61));
    }

    #[test]
    fn axes_saturate_at_one_hundred() {
        let card = composite(&ScoringConfig::default(), inputs(dec!(100), dec!(9), Decimal::ZERO, 25));

        assert_eq!(card.profit_factor, dec!(100));
        assert_eq!(card.consistency, dec!(100));
        assert_eq!(card.risk_management, dec!(100));
    }

    #[test]
    fn huge_profit_factor_saturates_axis() {
        let card = composite(&ScoringConfig::default(), inputs(dec!(50), Decimal::MAX, dec!(0.5), 2));

        assert_eq!(card.profit_factor, dec!(100));
        assert_eq!(card.overall, dec!(60));
    }

    #[test]
    fn full_drawdown_zeroes_risk_axis() {
        let card = composite(&ScoringConfig::default(), inputs(Decimal::ZERO, Decimal::ZERO, Decimal::ONE, 0));
        assert_eq!(card.risk_management, Decimal::ZERO);
    }

    #[test]
    fn weights_are_normalised() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                win_rate: dec!(3),
                profit_factor: Decimal::ZERO,
                risk_management: dec!(1),
                consistency: Decimal::ZERO,
                momentum: Decimal::ZERO,
            },
            ..ScoringConfig::default()
        };
        let card = composite(&config, inputs(dec!(40), dec!(1), dec!(0.2), 3));

        // (40 * 3 + 80 * 1) / 4
        assert_eq!(card.overall, dec!(50));
    }

    #[test]
    fn zero_weights_give_zero_overall() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                win_rate: Decimal::ZERO,
                profit_factor: Decimal::ZERO,
                risk_management: Decimal::ZERO,
                consistency: Decimal::ZERO,
                momentum: Decimal::ZERO,
            },
            ..ScoringConfig::default()
        };
        let card = composite(&config, inputs(dec!(70), dec!(2), Decimal::ZERO, 8));
        assert_eq!(card.overall, Decimal::ZERO);
    }
}
