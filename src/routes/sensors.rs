//! `GET /api/sensors`: the classified cards of the latest reading.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{failure_response, loading_response, Feeds};
use crate::{ClassifiedVariable, Feed, FeedState};

// ---

pub fn router() -> Router<Feeds> {
    // ---
    Router::new().route("/api/sensors", get(handler))
}

#[derive(Serialize)]
struct SensorsResponse<'a> {
    status: &'static str,
    fetched_at: DateTime<Utc>,
    variables: &'a [ClassifiedVariable],
}

async fn handler(State(feeds): State<Feeds>) -> Response {
    // ---
    let state = feeds.sensors.borrow().clone();

    match state {
        FeedState::Loading => loading_response(),
        FeedState::Failed(e) => failure_response(Feed::Sensors, &e),
        FeedState::Ready(snapshot) => {
            let body = SensorsResponse {
                status: "ready",
                fetched_at: snapshot.fetched_at,
                variables: &snapshot.variables,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
    }
}
