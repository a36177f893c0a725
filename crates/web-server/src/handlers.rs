use crate::{error::AppError, AppState};
use analytics::{MetricsResult, MonthCalendar};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use core_types::{NewTrade, TradeRecord, UserId};
use database::load_ledger;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// # GET /api/users/:user/metrics
/// Recomputes every dashboard metric from the user's full ledger.
pub async fn get_metrics(
    Path(user): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsResult>, AppError> {
    let user = UserId::new(user)?;
    let ledger = load_ledger(state.store.as_ref(), &user).await?;
    Ok(Json(state.engine.compute(&state.account, &ledger)))
}

/// # GET /api/users/:user/trades
/// The trade history, newest first.
pub async fn get_trades(
    Path(user): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TradeRecord>>, AppError> {
    let user = UserId::new(user)?;
    let ledger = load_ledger(state.store.as_ref(), &user).await?;
    Ok(Json(analytics::trade_log(&ledger)))
}

/// # POST /api/users/:user/trades
/// Logs a new trade and returns the stored record.
pub async fn create_trade(
    Path(user): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(trade): Json<NewTrade>,
) -> Result<(StatusCode, Json<TradeRecord>), AppError> {
    let user = UserId::new(user)?;
    let record = state.store.append(&user, trade).await?;
    tracing::info!(user = %user, trade_id = %record.id, symbol = %record.symbol, "Trade logged.");
    Ok((StatusCode::CREATED, Json(record)))
}

/// # GET /api/users/:user/calendar?year=&month=
/// Daily P&L for one month. Defaults to the current month.
pub async fn get_calendar(
    Path(user): Path<String>,
    Query(query): Query<CalendarQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MonthCalendar>, AppError> {
    let user = UserId::new(user)?;
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let ledger = load_ledger(state.store.as_ref(), &user).await?;
    let daily = analytics::daily_pnl(&ledger);
    Ok(Json(analytics::month_calendar(&daily, year, month)?))
}
