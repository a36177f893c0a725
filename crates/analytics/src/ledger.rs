use core_types::TradeRecord;

/// Orders a ledger by trade date, oldest first. Same-day trades keep the order
/// in which they were logged.
pub fn sorted_by_date(ledger: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = ledger.iter().collect();
    // `sort_by_key` is stable.
    ordered.sort_by_key(|trade| trade.date);
    ordered
}

/// The trade history table: newest first, and among same-day trades the most
/// recently logged first.
pub fn trade_log(ledger: &[TradeRecord]) -> Vec<TradeRecord> {
    sorted_by_date(ledger).into_iter().rev().cloned().collect()
}
