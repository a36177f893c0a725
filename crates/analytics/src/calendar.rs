use crate::error::AnalyticsError;
use crate::tone::PnlTone;
use chrono::{Datelike, NaiveDate};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Realized P&L of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: usize,
}

/// One cell of the month view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: usize,
    pub tone: PnlTone,
}

/// A month laid out in Monday-first weeks. Cells outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    pub total_pnl: Decimal,
    pub trading_days: usize,
    pub green_days: usize,
    pub red_days: usize,
}

/// Sums P&L per trade date, oldest day first. Days never carry over into each other.
pub fn daily_pnl(ledger: &[TradeRecord]) -> Vec<DailyPnl> {
    let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for trade in ledger {
        let entry = days.entry(trade.date).or_insert((Decimal::ZERO, 0));
        entry.0 += trade.pnl;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (pnl, trades))| DailyPnl { date, pnl, trades })
        .collect()
}

/// Builds the calendar grid for `year`/`month` from pre-aggregated daily P&L.
pub fn month_calendar(
    daily: &[DailyPnl],
    year: i32,
    month: u32,
) -> Result<MonthCalendar, AnalyticsError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(AnalyticsError::InvalidPeriod { year, month })?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or(AnalyticsError::InvalidPeriod { year, month })?;

    let by_date: HashMap<NaiveDate, &DailyPnl> = daily.iter().map(|d| (d.date, d)).collect();

    let leading = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<Option<CalendarDay>> = vec![None; leading];
    let mut calendar = MonthCalendar {
        year,
        month,
        weeks: Vec::new(),
        total_pnl: Decimal::ZERO,
        trading_days: 0,
        green_days: 0,
        red_days: 0,
    };

    for date in first.iter_days().take_while(|d| *d <= last) {
        let (pnl, trades) = by_date
            .get(&date)
            .map_or((Decimal::ZERO, 0), |d| (d.pnl, d.trades));
        let tone = PnlTone::of(pnl);

        if trades > 0 {
            calendar.trading_days += 1;
            calendar.total_pnl += pnl;
            match tone {
                PnlTone::Positive => calendar.green_days += 1,
                PnlTone::Negative => calendar.red_days += 1,
                PnlTone::Flat => {}
            }
        }

        cells.push(Some(CalendarDay { date, pnl, trades, tone }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    calendar.weeks = cells.chunks(7).map(|week| week.to_vec()).collect();

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::trade;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_pnl_per_day() {
        let ledger = vec![trade(5, "100"), trade(2, "-40"), trade(5, "-25.5")];

        let daily = daily_pnl(&ledger);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.day(), 2);
        assert_eq!(daily[0].pnl, dec!(-40));
        assert_eq!(daily[1].pnl, dec!(74.5));
        assert_eq!(daily[1].trades, 2);
    }

    #[test]
    fn empty_ledger_has_no_days() {
        assert!(daily_pnl(&[]).is_empty());
    }

    #[test]
    fn lays_out_month_monday_first() {
        // January 2024 starts on a Monday and has 31 days.
        let daily = daily_pnl(&[trade(1, "500"), trade(2, "-200"), trade(3, "0")]);
        let calendar = month_calendar(&daily, 2024, 1).unwrap();

        assert_eq!(calendar.weeks.len(), 5);
        assert!(calendar.weeks.iter().all(|w| w.len() == 7));
        let first = calendar.weeks[0][0].as_ref().unwrap();
        assert_eq!(first.date.day(), 1);
        assert_eq!(first.tone, PnlTone::Positive);
        assert_eq!(calendar.weeks[0][1].as_ref().unwrap().tone, PnlTone::Negative);
        // Trailing cells after the 31st are padding.
        assert!(calendar.weeks[4][3].is_none());

        assert_eq!(calendar.total_pnl, dec!(300));
        assert_eq!(calendar.trading_days, 3);
        assert_eq!(calendar.green_days, 1);
        assert_eq!(calendar.red_days, 1);
    }

    #[test]
    fn pads_leading_days_and_ignores_other_months() {
        // February 2024 starts on a Thursday.
        let daily = daily_pnl(&[trade(15, "100")]);
        let calendar = month_calendar(&daily, 2024, 2).unwrap();

        assert!(calendar.weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(calendar.weeks[0][3].as_ref().unwrap().date.day(), 1);
        assert_eq!(calendar.total_pnl, Decimal::ZERO);
        assert_eq!(calendar.trading_days, 0);
    }

    #[test]
    fn rejects_invalid_month() {
        let err = month_calendar(&[], 2024, 13).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidPeriod { month: 13, .. }));
        assert!(month_calendar(&[], 2024, 0).is_err());
    }
}
