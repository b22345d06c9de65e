//! HTTP routing for the admission service.
//!
//! Deliberately thin: route wiring and timeouts only. All request
//! handling logic lives in [`crate::admission::AdmissionService`];
//! `handlers` only translates between wire shapes and that service.

mod dto;
mod handlers;

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::admission::AdmissionService;

/// Per-request deadline enforced by the transport layer: a request whose
/// proof-of-work verification or handler body runs past this is aborted
/// before it can take the store's write lock. A request that has
/// already entered `process_claim` always runs to completion
/// regardless, since mid-mutation cancellation is unsupported.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the admission service's HTTP router.
pub fn router(service: AdmissionService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/ip/:address", get(handlers::get_ip))
        .route("/api/subnet/:address/:prefix", get(handlers::get_subnet))
        .route("/api/claim/:address", post(handlers::submit_claim))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(service)
}
