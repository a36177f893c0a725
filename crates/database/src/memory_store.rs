use crate::DbError;
use crate::store::TradeStore;
use async_trait::async_trait;
use core_types::{NewTrade, TradeRecord, UserId};
use tokio::sync::RwLock;

/// Keeps every trade in process memory. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    trades: RwLock<Vec<TradeRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing table of trades, in insertion order.
    pub fn with_records(trades: Vec<TradeRecord>) -> Self {
        Self {
            trades: RwLock::new(trades),
        }
    }
}

#[async_trait]
impl TradeStore for InMemoryStore {
    async fn read(&self, user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
        let trades = self.trades.read().await;
        Ok(trades.iter().filter(|t| &t.owner == user).cloned().collect())
    }

    async fn append(&self, user: &UserId, trade: NewTrade) -> Result<TradeRecord, DbError> {
        let record = trade.into_record(user)?;
        self.trades.write().await.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Side;
    use rust_decimal_macros::dec;

    fn new_trade(day: u32, symbol: &str) -> NewTrade {
        NewTrade {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            symbol: symbol.to_string(),
            pnl: dec!(125),
            side: Side::Long,
            r_multiple: Some(dec!(2.5)),
            setup: Some("Breakout".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn filters_by_owner_and_keeps_order() {
        let store = InMemoryStore::new();
        let adam = UserId::new("adam").unwrap();
        let eve = UserId::new("eve").unwrap();

        store.append(&adam, new_trade(3, "NQ")).await.unwrap();
        store.append(&eve, new_trade(1, "ES")).await.unwrap();
        store.append(&adam, new_trade(2, "CL")).await.unwrap();

        let ledger = store.read(&adam).await.unwrap();
        let symbols: Vec<&str> = ledger.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, ["NQ", "CL"]);
        assert!(ledger.iter().all(|t| t.owner == adam));
        assert_eq!(ledger[0].r_multiple, dec!(2.5));
    }

    #[tokio::test]
    async fn appends_after_seeded_records() {
        let adam = UserId::new("adam").unwrap();
        let seeded = new_trade(1, "NQ").into_record(&adam).unwrap();
        let store = InMemoryStore::with_records(vec![seeded.clone()]);

        store.append(&adam, new_trade(2, "ES")).await.unwrap();

        let ledger = store.read(&adam).await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0], seeded);
        assert_eq!(ledger[1].symbol, "ES");
    }

    #[tokio::test]
    async fn unknown_user_has_empty_ledger() {
        let store = InMemoryStore::new();
        let ledger = store.read(&UserId::new("nobody").unwrap()).await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_trade() {
        let store = InMemoryStore::new();
        let user = UserId::new("adam").unwrap();

        let err = store.append(&user, new_trade(1, " ")).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidTrade(_)));
        assert!(store.read(&user).await.unwrap().is_empty());
    }
}
