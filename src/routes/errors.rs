//! `GET /api/errors`: the ingestion error log, in server order.

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
use crate::{Feed, FeedState, NO_ERRORS_MESSAGE};

// ---

pub fn router() -> Router<Feeds> {
    // ---
    Router::new().route("/api/errors", get(handler))
}

/// One table row; `position` is the 1-based row number shown to the user.
#[derive(Serialize)]
struct Row<'a> {
    position: usize,
    id: i64,
    message: &'a str,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ErrorsResponse<'a> {
    Ready {
        fetched_at: DateTime<Utc>,
        entries: Vec<Row<'a>>,
    },
    Empty {
        fetched_at: DateTime<Utc>,
        message: &'static str,
    },
}

async fn handler(State(feeds): State<Feeds>) -> Response {
    // ---
    let state = feeds.errors.borrow().clone();

    let snapshot = match state {
        FeedState::Loading => return loading_response(),
        FeedState::Failed(e) => return failure_response(Feed::Errors, &e),
        FeedState::Ready(snapshot) => snapshot,
    };

    let body = if snapshot.log.is_empty() {
        ErrorsResponse::Empty {
            fetched_at: snapshot.fetched_at,
            message: NO_ERRORS_MESSAGE,
        }
    } else {
        let entries = snapshot
            .log
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| Row {
                position: i + 1,
                id: e.id,
                message: &e.message,
                timestamp: e.timestamp,
            })
            .collect();
        ErrorsResponse::Ready {
            fetched_at: snapshot.fetched_at,
            entries,
        }
    };

    (StatusCode::OK, Json(body)).into_response()
}
