use crate::DbError;
use crate::store::TradeStore;
use async_trait::async_trait;
use core_types::{NewTrade, TradeRecord, UserId};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Keeps every user's trades in one JSON array on disk.
///
/// Reads load the whole table and filter by owner. Appends rewrite the whole
/// file through a temporary sibling and a rename, so a reader never sees a
/// half-written table. Appends from this process are serialized; nothing
/// coordinates separate processes.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the whole table. A missing or blank file is an empty table.
    async fn load_all(&self) -> Result<Vec<TradeRecord>, DbError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| DbError::MalformedRecord(format!("{}: {e}", self.path.display())))
    }

    async fn write_all(&self, trades: &[TradeRecord]) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(trades)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TradeStore for JsonFileStore {
    async fn read(&self, user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
        let trades = self.load_all().await?;
        Ok(trades.into_iter().filter(|t| &t.owner == user).collect())
    }

    async fn append(&self, user: &UserId, trade: NewTrade) -> Result<TradeRecord, DbError> {
        let record = trade.into_record(user)?;

        let _guard = self.write_lock.lock().await;
        let mut trades = self.load_all().await?;
        trades.push(record.clone());
        self.write_all(&trades).await?;

        tracing::info!(user = %user, trade_id = %record.id, path = %self.path.display(), "Trade appended to ledger file.");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Side;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("alpha-terminal-{}", Uuid::new_v4()))
            .join("trades.json")
    }

    fn new_trade(day: u32, pnl: rust_decimal::Decimal) -> NewTrade {
        NewTrade {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            symbol: "mes".to_string(),
            pnl,
            side: Side::Short,
            r_multiple: None,
            setup: None,
            notes: Some("chased entry".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_ledger() {
        let store = JsonFileStore::new(temp_path());
        let ledger = store.read(&UserId::new("adam").unwrap()).await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn append_then_read_back() {
        let path = temp_path();
        let store = JsonFileStore::new(&path);
        let adam = UserId::new("adam").unwrap();
        let eve = UserId::new("eve").unwrap();

        let first = store.append(&adam, new_trade(4, dec!(-80.25))).await.unwrap();
        store.append(&eve, new_trade(5, dec!(40))).await.unwrap();
        store.append(&adam, new_trade(3, dec!(310))).await.unwrap();

        // A fresh store over the same file sees everything that was written.
        let reopened = JsonFileStore::new(&path);
        let ledger = reopened.read(&adam).await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0], first);
        assert_eq!(ledger[0].symbol, "MES");
        assert_eq!(ledger[0].notes, "chased entry");
        assert_eq!(ledger[1].pnl, dec!(310));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let path = temp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"[{\"symbol\": \"NQ\"}]").await.unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.read(&UserId::new("adam").unwrap()).await.unwrap_err();
        assert!(matches!(err, DbError::MalformedRecord(_)));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn blank_file_is_an_empty_ledger() {
        let path = temp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"  \n").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.read(&UserId::new("adam").unwrap()).await.unwrap().is_empty());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
