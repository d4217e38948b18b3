//! Agrometeorological dashboard engine.
//!
//! Polls a data source for the latest sensor reading and the ingestion error
//! log, validates both payloads, classifies every sensor variable into an
//! agronomic tier with its explanatory text and badge severity, and serves
//! the result as a read-only JSON API.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP): sibling
//! modules import shared types from the crate root, not from each other's
//! internals.

pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod routes;
pub mod schema;
pub mod status;
pub mod variables;

pub use classify::{classify, ClassifiedVariable, Classification, Snapshot, Tier};
pub use config::Config;
pub use error::{Feed, FeedError, SchemaError};
pub use models::{ErrorLog, ErrorLogEntry, SensorReading, NO_ERRORS_MESSAGE};
pub use poller::{
    spawn_error_poller, spawn_sensor_poller, ErrorSnapshot, ErrorState, FeedState, PollerHandle,
    SensorState,
};
pub use status::{severity, Severity};
pub use variables::VariableId;
