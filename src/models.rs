//! Data models for the two dashboard feeds.
//!
//! Values of these types are only ever built by the validators in
//! [`crate::schema`]; once constructed they are never mutated, a new poll
//! replaces them wholesale.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::variables::VariableId;

// ---

/// One complete snapshot from `GET {backend}/sensors`.
///
/// All twenty fields are required. The evapotranspiration intermediates
/// (`ETo`, radiation terms, `delta`, `gamma`, `es`, `ea`) arrive already
/// computed by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    // ---
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    pub pressure: f64,
    pub luminosity: f64,
    #[serde(rename = "soilMoisture")]
    pub soil_moisture: f64,
    #[serde(rename = "ETo")]
    pub eto: f64,
    #[serde(rename = "TmaxC")]
    pub tmax_c: f64,
    #[serde(rename = "TminC")]
    pub tmin_c: f64,
    #[serde(rename = "Tmean")]
    pub tmean: f64,
    #[serde(rename = "Rs")]
    pub rs: f64,
    #[serde(rename = "Rns")]
    pub rns: f64,
    #[serde(rename = "Ra")]
    pub ra: f64,
    #[serde(rename = "Rso")]
    pub rso: f64,
    #[serde(rename = "Rnl")]
    pub rnl: f64,
    #[serde(rename = "Rn")]
    pub rn: f64,
    pub delta: f64,
    pub gamma: f64,
    pub es: f64,
    pub ea: f64,
}

impl SensorReading {
    // ---
    pub fn get(&self, id: VariableId) -> f64 {
        match id {
            VariableId::Temperature => self.temperature,
            VariableId::Humidity => self.humidity,
            VariableId::WindSpeed => self.wind_speed,
            VariableId::Pressure => self.pressure,
            VariableId::Luminosity => self.luminosity,
            VariableId::SoilMoisture => self.soil_moisture,
            VariableId::Eto => self.eto,
            VariableId::TmaxC => self.tmax_c,
            VariableId::TminC => self.tmin_c,
            VariableId::Tmean => self.tmean,
            VariableId::Rs => self.rs,
            VariableId::Rns => self.rns,
            VariableId::Ra => self.ra,
            VariableId::Rso => self.rso,
            VariableId::Rnl => self.rnl,
            VariableId::Rn => self.rn,
            VariableId::Delta => self.delta,
            VariableId::Gamma => self.gamma,
            VariableId::Es => self.es,
            VariableId::Ea => self.ea,
        }
    }

    /// Build from values laid out in [`VariableId::ALL`] order.
    pub fn from_ordered(v: [f64; 20]) -> Self {
        SensorReading {
            temperature: v[0],
            humidity: v[1],
            wind_speed: v[2],
            pressure: v[3],
            luminosity: v[4],
            soil_moisture: v[5],
            eto: v[6],
            tmax_c: v[7],
            tmin_c: v[8],
            tmean: v[9],
            rs: v[10],
            rns: v[11],
            ra: v[12],
            rso: v[13],
            rnl: v[14],
            rn: v[15],
            delta: v[16],
            gamma: v[17],
            es: v[18],
            ea: v[19],
        }
    }
}

/// A single ingestion error reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLogEntry {
    // ---
    pub id: i64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The error feed in server-reported order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<ErrorLogEntry>,
}

/// Shown instead of an empty table.
pub const NO_ERRORS_MESSAGE: &str = "Nenhum erro encontrado.";

impl ErrorLog {
    // ---
    pub fn new(entries: Vec<ErrorLogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ErrorLogEntry] {
        &self.entries
    }

    /// An empty log is a valid state, rendered as [`NO_ERRORS_MESSAGE`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
