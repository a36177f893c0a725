use crate::DbError;
use crate::store::TradeStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{NewTrade, Side, TradeRecord, UserId};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

/// The `DbRepository` stores the ledger in the PostgreSQL `trades` table.
/// It encapsulates all SQL queries and row mapping.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps one `trades` row back into a record owned by `owner`.
fn trade_from_row(row: &PgRow, owner: &UserId) -> Result<TradeRecord, DbError> {
    let id: Uuid = row.try_get("trade_id")?;
    let side: String = row.try_get("side")?;
    let side = side
        .parse::<Side>()
        .map_err(|e| DbError::MalformedRecord(format!("trade {id}: {e}")))?;

    Ok(TradeRecord {
        id,
        owner: owner.clone(),
        date: row.try_get::<NaiveDate, _>("trade_date")?,
        symbol: row.try_get("symbol")?,
        pnl: row.try_get::<Decimal, _>("pnl")?,
        side,
        r_multiple: row.try_get::<Decimal, _>("r_multiple")?,
        setup: row.try_get("setup")?,
        notes: row.try_get("notes")?,
    })
}

#[async_trait]
impl TradeStore for DbRepository {
    async fn read(&self, user: &UserId) -> Result<Vec<TradeRecord>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT trade_id, trade_date, symbol, pnl, side, r_multiple, setup, notes
            FROM trades
            WHERE owner = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| trade_from_row(row, user)).collect()
    }

    async fn append(&self, user: &UserId, trade: NewTrade) -> Result<TradeRecord, DbError> {
        let record = trade.into_record(user)?;

        sqlx::query(
            r#"
            INSERT INTO trades (trade_id, owner, trade_date, symbol, pnl, side, r_multiple, setup, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(record.owner.as_str())
        .bind(record.date)
        .bind(&record.symbol)
        .bind(record.pnl)
        .bind(record.side.as_str())
        .bind(record.r_multiple)
        .bind(&record.setup)
        .bind(&record.notes)
        .execute(&self.pool)
        .await?;

        tracing::info!(user = %user, trade_id = %record.id, "Trade saved to database.");
        Ok(record)
    }
}
