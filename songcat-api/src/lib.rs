//! songcat-api library - Song catalog service
//!
//! Stores song metadata and lyrics, serves filtered listings and paged
//! lyrics, and enriches new songs from an external song info provider
//! before persisting them.

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::Span;

pub mod api;
pub mod catalog;
pub mod enrichment;
pub mod error;
pub mod storage;

use catalog::CatalogService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations over storage and the enrichment provider
    pub catalog: CatalogService,
    /// Cancelled when shutdown begins; in-flight creates stop before writing
    pub shutdown: CancellationToken,
    /// Server start, for health uptime
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: CatalogService, shutdown: CancellationToken) -> Self {
        Self {
            catalog,
            shutdown,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Every request gets a span carrying a fresh request id, method, path and
/// query; the response event records status and latency.
pub fn build_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %request.method(),
                path = %request.uri().path(),
                query = request.uri().query().unwrap_or(""),
            )
        })
        .on_request(|_request: &Request<Body>, _span: &Span| {
            tracing::info!("Incoming request");
        })
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::info!(
                status = response.status().as_u16(),
                duration_ms = latency.as_millis() as u64,
                "Response sent"
            );
        });

    Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes())
        .layer(trace)
        .with_state(state)
}
