//! Fake data source for poller and end-to-end tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agrometeo_dashboard::{Config, FeedState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::watch;

// ---

/// What the fake backend answers on one route.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    /// `200` with a raw, non-JSON body.
    Text(&'static str),
    Slow(Duration, Value),
}

#[derive(Clone, Default)]
pub struct Counters {
    pub hits: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl Counters {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct Route {
    reply: Arc<Mutex<Reply>>,
    counters: Counters,
}

#[derive(Clone)]
struct Backend {
    sensors: Route,
    errors: Route,
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    sensors: Route,
    errors: Route,
}

impl FakeBackend {
    pub async fn start(sensors: Reply, errors: Reply) -> FakeBackend {
        // ---
        let backend = Backend {
            sensors: Route { reply: Arc::new(Mutex::new(sensors)), counters: Counters::default() },
            errors: Route { reply: Arc::new(Mutex::new(errors)), counters: Counters::default() },
        };

        let app = Router::new()
            .route("/sensors", get(sensors_handler))
            .route("/errors", get(errors_handler))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        FakeBackend { addr, sensors: backend.sensors, errors: backend.errors }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Fast polling against this backend.
    pub fn config(&self) -> Config {
        Config {
            poll_interval: Duration::from_millis(50),
            request_timeout: Duration::from_secs(2),
            ..Config::for_backend(self.url())
        }
    }

    pub fn set_sensors(&self, reply: Reply) {
        *self.sensors.reply.lock().unwrap() = reply;
    }

    pub fn set_errors(&self, reply: Reply) {
        *self.errors.reply.lock().unwrap() = reply;
    }

    pub fn sensor_counters(&self) -> &Counters {
        &self.sensors.counters
    }
}

async fn sensors_handler(State(b): State<Backend>) -> Response {
    answer(&b.sensors).await
}

async fn errors_handler(State(b): State<Backend>) -> Response {
    answer(&b.errors).await
}

async fn answer(route: &Route) -> Response {
    // ---
    let c = &route.counters;
    c.hits.fetch_add(1, Ordering::SeqCst);
    let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    c.max_in_flight.fetch_max(now, Ordering::SeqCst);

    let reply = route.reply.lock().unwrap().clone();
    let response = match reply {
        Reply::Json(v) => Json(v).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
        Reply::Text(body) => body.into_response(),
        Reply::Slow(delay, v) => {
            tokio::time::sleep(delay).await;
            Json(v).into_response()
        }
    };

    c.in_flight.fetch_sub(1, Ordering::SeqCst);
    response
}

/// A port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn scenario_reading() -> Value {
    // ---
    json!({
        "temperature": 10, "humidity": 45, "windSpeed": 3, "pressure": 100,
        "luminosity": 500, "soilMoisture": 35, "ETo": 3, "TmaxC": 25,
        "TminC": 10, "Tmean": 18, "Rs": 15, "Rns": 10, "Ra": 7, "Rso": 7,
        "Rnl": 3, "Rn": 15, "delta": 0.1, "gamma": 0.06, "es": 2.3, "ea": 1.8
    })
}

pub fn without(mut payload: Value, key: &str) -> Value {
    payload.as_object_mut().unwrap().remove(key);
    payload
}

/// Wait up to five seconds for the published state to satisfy `pred`.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<FeedState<T>>, pred: F) -> FeedState<T>
where
    T: Clone,
    F: FnMut(&FeedState<T>) -> bool,
{
    // ---
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("timed out waiting for feed state")
        .expect("poller dropped its channel");
    state.clone()
}
