use crate::DbError;
use async_trait::async_trait;
use core_types::{NewTrade, TradeRecord, UserId};

/// The storage capability the dashboard depends on.
///
/// Adapters only have to read a user's trades back in the order they were
/// logged and append new ones. There are no updates, deletes or transactions.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Every trade owned by `user`, in insertion order.
    async fn read(&self, user: &UserId) -> Result<Vec<TradeRecord>, DbError>;

    /// Validates `trade`, stamps it with an id and `user`, and stores it.
    async fn append(&self, user: &UserId, trade: NewTrade) -> Result<TradeRecord, DbError>;
}

/// Reads a ledger for the analytics engine.
///
/// A user the backend knows nothing about simply has an empty ledger; every
/// other failure is passed on to the caller.
pub async fn load_ledger(store: &dyn TradeStore, user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
    match store.read(user).await {
        Err(DbError::NotFound) => {
            tracing::debug!(user = %user, "No ledger found, using an empty one.");
            Ok(Vec::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MissingStore;

    #[async_trait]
    impl TradeStore for MissingStore {
        async fn read(&self, _user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
            Err(DbError::NotFound)
        }

        async fn append(&self, _user: &UserId, _trade: NewTrade) -> Result<TradeRecord, DbError> {
            Err(DbError::NotFound)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl TradeStore for BrokenStore {
        async fn read(&self, _user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
            Err(DbError::MalformedRecord("row 3".to_string()))
        }

        async fn append(&self, _user: &UserId, _trade: NewTrade) -> Result<TradeRecord, DbError> {
            Err(DbError::MalformedRecord("row 3".to_string()))
        }
    }

    #[tokio::test]
    async fn not_found_maps_to_empty_ledger() {
        let user = UserId::new("ghost").unwrap();
        let ledger = load_ledger(&MissingStore, &user).await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn other_errors_are_propagated() {
        let user = UserId::new("adam").unwrap();
        let err = load_ledger(&BrokenStore, &user).await.unwrap_err();
        assert!(matches!(err, DbError::MalformedRecord(_)));
    }
}
