//! unit-scrape — HTTP scrape surface for the exporter.
//!
//! Exposes the collector over axum. Each incoming scrape triggers one
//! collection cycle; overlapping scrapes are safe because the collector
//! is read-only between fetches.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::warn;

use unit_metrics::{UnitCollector, render_text};

/// Shared state for scrape handlers.
#[derive(Clone)]
pub struct ScrapeState {
    pub collector: Arc<UnitCollector>,
}

/// Build the scrape router over an injected collector.
pub fn build_router(collector: Arc<UnitCollector>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(ScrapeState { collector })
}

/// GET /metrics
///
/// A failed fetch yields an empty exposition body for this cycle; the
/// failure is logged, never fatal, and leaves nothing behind for the
/// next scrape.
async fn metrics(State(state): State<ScrapeState>) -> impl IntoResponse {
    let body = match state.collector.collect().await {
        Ok(samples) => render_text(&samples),
        Err(e) => {
            warn!(error = %e, "scrape cycle failed");
            String::new()
        }
    };

    (
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

/// GET /health
async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
