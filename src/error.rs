//! Error types for feed acquisition and payload validation.
//!
//! Nothing here is fatal: pollers turn every failure into a published
//! [`FeedError`] and keep polling.

use std::fmt;

use thiserror::Error;

// ---

/// Why a single field of a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Key absent from the object.
    Missing,
    /// Present but not of the expected JSON type.
    WrongType { found: &'static str },
    /// A number that is NaN or infinite. Not producible from parsed JSON.
    NonFinite,
    /// An integral number outside the `i64` range.
    OutOfRange,
    /// A string that does not parse as a date/time.
    Unparsable { value: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing => write!(f, "missing"),
            FieldIssue::WrongType { found } => write!(f, "wrong type ({found})"),
            FieldIssue::NonFinite => write!(f, "not a finite number"),
            FieldIssue::OutOfRange => write!(f, "integer out of range"),
            FieldIssue::Unparsable { value } => write!(f, "unparsable date/time {value:?}"),
        }
    }
}

/// A named field together with what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.issue)
    }
}

/// Sensor payload rejected by the validator. No partial reading exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid sensor fields: {}", join(.0))]
    Fields(Vec<FieldError>),
}

impl SchemaError {
    /// Field-level problems, empty when the payload was not an object at all.
    pub fn fields(&self) -> &[FieldError] {
        match self {
            SchemaError::NotAnObject { .. } => &[],
            SchemaError::Fields(fields) => fields,
        }
    }
}

/// A rejected entry of the error feed, by 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    pub index: usize,
    pub problem: EntryProblem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryProblem {
    NotAnObject { found: &'static str },
    Field(FieldError),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            EntryProblem::NotAnObject { found } => {
                write!(f, "entry {}: expected an object, found {found}", self.index)
            }
            EntryProblem::Field(field) => write!(f, "entry {}: {field}", self.index),
        }
    }
}

/// Error feed rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorLogSchemaError {
    #[error("expected a JSON array, found {found}")]
    NotAnArray { found: &'static str },
    #[error("invalid error entries: {}", join(.0))]
    Entries(Vec<EntryError>),
}

/// Which feed a failure belongs to; selects the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Sensors,
    Errors,
}

impl Feed {
    pub fn path(self) -> &'static str {
        match self {
            Feed::Sensors => "sensors",
            Feed::Errors => "errors",
        }
    }
}

/// What a poller publishes when a cycle fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The request did not complete or returned a non-success status.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response arrived but failed structural validation.
    #[error("schema failure: {0}")]
    Schema(String),
}

impl FeedError {
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Schema(_) => "schema",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            FeedError::Transport(detail) | FeedError::Schema(detail) => detail,
        }
    }

    /// The sentence the dashboard shows in place of data.
    pub fn user_message(&self, feed: Feed) -> &'static str {
        match (feed, self) {
            (Feed::Sensors, FeedError::Schema(_)) => "Dados dos sensores inválidos.",
            (Feed::Sensors, FeedError::Transport(_)) => "Erro ao buscar dados dos sensores.",
            (Feed::Errors, _) => "Erro ao buscar erros.",
        }
    }
}

impl From<SchemaError> for FeedError {
    fn from(e: SchemaError) -> Self {
        FeedError::Schema(e.to_string())
    }
}

impl From<ErrorLogSchemaError> for FeedError {
    fn from(e: ErrorLogSchemaError) -> Self {
        FeedError::Schema(e.to_string())
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Transport(e.to_string())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
