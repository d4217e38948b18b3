// src/routes/health.rs
//! Liveness endpoint for the dashboard service.
//!
//! `GET /health` answers as long as the process is serving, and reports
//! which state each feed is in (`loading`, `ready` or `failed`). A failed
//! feed does not make the service unhealthy: the pollers keep retrying.
//! Follows the Explicit Module Boundary Pattern (EMBP): the gateway
//! (`mod.rs`) only sees [`router`].

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::Feeds;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    sensors: &'static str,
    errors: &'static str,
}

/// Handle `GET /health`.
///
/// Only borrows the latest published states; never touches the backend.
async fn health(State(feeds): State<Feeds>) -> Json<HealthResponse> {
    // ---
    let sensors = feeds.sensors.borrow().label();
    let errors = feeds.errors.borrow().label();

    Json(HealthResponse {
        status: "ok",
        sensors,
        errors,
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<Feeds> {
    Router::new().route("/health", get(health))
}
