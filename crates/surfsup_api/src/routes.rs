//! Router assembly and server loop.

use crate::handlers::{
    malformed_date_path, not_found, precipitation, stations, stats_between, stats_from, tobs,
};
use crate::index::{home, jsonified};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;

/// Builds the application router.
///
/// Static segments take precedence over the `{start}` capture, so
/// `/api/v1.0/stations` never reaches the stats handler. The catch-all only
/// sees paths with more than two segments after `v1.0`, such as a date
/// written with slashes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/jsonified", get(jsonified))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(stats_from))
        .route("/api/v1.0/{start}/{end}", get(stats_between))
        .route("/api/v1.0/{*dates}", get(malformed_date_path))
        .fallback(not_found)
        .with_state(state)
}

/// Serves the router on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("event=http_listen module=api status=ok addr={addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=http_shutdown module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=http_shutdown module=api status=error error_code=signal_failed error={err}");
        std::future::pending::<()>().await;
    }
}
