use analytics::AnalyticsEngine;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use core_types::AccountConfig;
use database::TradeStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TradeStore>,
    pub engine: AnalyticsEngine,
    pub account: AccountConfig,
}

/// Builds the API router. Kept separate from `run_server` so tests can drive it directly.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/users/:user/metrics", get(handlers::get_metrics))
        .route(
            "/api/users/:user/trades",
            get(handlers::get_trades).post(handlers::create_trade),
        )
        .route("/api/users/:user/calendar", get(handlers::get_calendar))
        .with_state(Arc::new(state))
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Serves the API on `addr` until the process is stopped.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    // Tracing is initialized by the binary before the server starts.
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
