use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Colour hint for a P&L figure. Renderers map each tone to their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlTone {
    Positive,
    Negative,
    Flat,
}

impl PnlTone {
    pub fn of(pnl: Decimal) -> Self {
        if pnl > Decimal::ZERO {
            PnlTone::Positive
        } else if pnl < Decimal::ZERO {
            PnlTone::Negative
        } else {
            PnlTone::Flat
        }
    }
}
