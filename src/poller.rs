//! Polling controller for the sensor and error feeds.
//!
//! Each feed runs in its own task with its own timer and its own `watch`
//! channel; the two never share state. One cycle is strictly
//! fetch -> validate -> classify -> publish, and the published
//! [`FeedState`] is always replaced as a whole.
//!
//! A timer tick that fires while a request is still outstanding is skipped,
//! so at most one request per feed is ever in flight. Failures are published
//! and the next tick retries at the same fixed period.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::classify::Snapshot;
use crate::config::Config;
use crate::error::{Feed, FeedError};
use crate::models::ErrorLog;
use crate::schema::{validate_error_log, validate_sensor_reading};

// ---

/// What a feed currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState<T> {
    /// Nothing received yet.
    Loading,
    Ready(Arc<T>),
    /// The last cycle failed; no stale data is kept alongside it.
    Failed(FeedError),
}

impl<T> FeedState<T> {
    pub fn label(&self) -> &'static str {
        match self {
            FeedState::Loading => "loading",
            FeedState::Ready(_) => "ready",
            FeedState::Failed(_) => "failed",
        }
    }

    pub fn ready(&self) -> Option<&Arc<T>> {
        match self {
            FeedState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FeedError> {
        match self {
            FeedState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A validated error feed and when it arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub log: ErrorLog,
}

pub type SensorState = FeedState<Snapshot>;
pub type ErrorState = FeedState<ErrorSnapshot>;

type Decoder<T> = fn(&Value, DateTime<Utc>) -> Result<T, FeedError>;

/// Owner side of a running poller.
///
/// Dropping the handle has the same effect as [`PollerHandle::stop`].
pub struct PollerHandle<T> {
    state: watch::Receiver<FeedState<T>>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl<T> PollerHandle<T> {
    /// A read-only view of the published state.
    pub fn subscribe(&self) -> watch::Receiver<FeedState<T>> {
        self.state.clone()
    }

    /// Stop scheduling polls. A request already in flight is not aborted on
    /// the wire, but its result is discarded.
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    /// Stop and wait for the task to finish.
    pub async fn shutdown(self) {
        // ---
        self.stop();
        if let Err(e) = self.task.await {
            warn!("Poller task ended abnormally: {}", e);
        }
    }
}

/// Start polling `{backend}/sensors`.
pub fn spawn_sensor_poller(config: &Config, client: Client) -> PollerHandle<Snapshot> {
    spawn(Feed::Sensors, config, client, decode_sensors)
}

/// Start polling `{backend}/errors`.
pub fn spawn_error_poller(config: &Config, client: Client) -> PollerHandle<ErrorSnapshot> {
    spawn(Feed::Errors, config, client, decode_errors)
}

fn decode_sensors(value: &Value, fetched_at: DateTime<Utc>) -> Result<Snapshot, FeedError> {
    let reading = validate_sensor_reading(value)?;
    Ok(Snapshot::new(reading, fetched_at))
}

fn decode_errors(value: &Value, fetched_at: DateTime<Utc>) -> Result<ErrorSnapshot, FeedError> {
    let log = validate_error_log(value)?;
    Ok(ErrorSnapshot { fetched_at, log })
}

fn spawn<T>(feed: Feed, config: &Config, client: Client, decode: Decoder<T>) -> PollerHandle<T>
where
    T: Send + Sync + 'static,
{
    // ---
    let (state_tx, state_rx) = watch::channel(FeedState::Loading);
    let (stop_tx, stop_rx) = watch::channel(false);

    let job = PollJob {
        feed,
        url: config.feed_url(feed.path()),
        period: config.poll_interval,
        timeout: config.request_timeout,
        client,
        decode,
    };

    let task = tokio::spawn(job.run(state_tx, stop_rx));

    PollerHandle {
        state: state_rx,
        stop: stop_tx,
        task,
    }
}

struct PollJob<T> {
    feed: Feed,
    url: String,
    period: Duration,
    timeout: Duration,
    client: Client,
    decode: Decoder<T>,
}

impl<T> PollJob<T> {
    async fn run(self, state: watch::Sender<FeedState<T>>, mut stop: watch::Receiver<bool>) {
        // ---
        info!(
            "Starting {} poller for {} (interval: {}ms)",
            self.feed.path(),
            self.url,
            self.period.as_millis()
        );

        // first tick completes immediately
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop.changed() => break,
            }

            let outcome = tokio::select! {
                outcome = self.poll_once() => outcome,
                _ = stop.changed() => break,
            };

            if *stop.borrow() {
                break;
            }

            let next = match outcome {
                Ok(value) => {
                    debug!("Published new {} snapshot", self.feed.path());
                    FeedState::Ready(Arc::new(value))
                }
                Err(e) => {
                    warn!("{} poll failed: {}", self.feed.path(), e);
                    FeedState::Failed(e)
                }
            };
            state.send_replace(next);
        }

        info!("Stopped {} poller", self.feed.path());
    }

    async fn poll_once(&self) -> Result<T, FeedError> {
        // ---
        let body = self.fetch().await?;
        (self.decode)(&body, Utc::now())
    }

    async fn fetch(&self) -> Result<Value, FeedError> {
        // ---
        debug!("Fetching {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        // A body that arrived but is not JSON fails validation, not the transport.
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| FeedError::Schema(format!("invalid JSON body: {e}")))
    }
}
