use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::watch;

use crate::{ErrorState, Feed, FeedError, SensorState};

mod errors;
mod health;
mod sensors;

// ---

/// Read-only views of both feeds, cloned into every handler.
#[derive(Clone)]
pub struct Feeds {
    pub sensors: watch::Receiver<SensorState>,
    pub errors: watch::Receiver<ErrorState>,
}

pub fn router(feeds: Feeds) -> Router {
    // ---
    Router::new()
        .merge(sensors::router())
        .merge(errors::router())
        .merge(health::router())
        .with_state(feeds)
}

// ---

/// Body for states with no data to show.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Unavailable<'a> {
    Loading,
    Error {
        kind: &'static str,
        message: &'static str,
        detail: &'a str,
    },
}

/// 503 until the first cycle of a feed completes.
fn loading_response() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Json(Unavailable::Loading)).into_response()
}

/// 502 with the user-facing sentence for the failed feed.
fn failure_response(feed: Feed, e: &FeedError) -> Response {
    // ---
    let body = Unavailable::Error {
        kind: e.kind(),
        message: e.user_message(feed),
        detail: e.detail(),
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
