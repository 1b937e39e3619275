//! Lightweight admin HTTP server spawner
//!
//! Exposes `/healthz` and `/metrics` endpoints, with metrics provided by caller.

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

async fn healthz() -> &'static str { "OK" }

async fn metrics_handler(f: fn() -> (StatusCode, String)) -> (StatusCode, String) {
    f()
}

/// Router serving the admin endpoints.
pub fn admin_router(metrics_fn: fn() -> (StatusCode, String)) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || metrics_handler(metrics_fn)))
}

/// Spawn the admin server on the current runtime.
/// Bind failures are logged; the main listener keeps running without it.
pub fn spawn_admin_server(addr: &str, metrics_fn: fn() -> (StatusCode, String)) {
    let addr = addr.to_string();
    tokio::spawn(async move {
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!(%addr, error = %e, "admin server bind failed");
                return;
            }
        };
        info!(%addr, "admin server listening");
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(%addr, error = %e, "admin server stopped");
        }
    });
}
