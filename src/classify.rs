//! Threshold classifier: value -> agronomic tier and explanatory text.
//!
//! The rules are data in [`crate::variables::DESCRIPTORS`]; this module only
//! walks them. Classification is pure, so a snapshot is recomputed from the
//! reading every time it is published.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::SensorReading;
use crate::status::{badge_color_of, severity_of, Severity};
use crate::variables::{Rating, VariableId};

// ---

/// Fallback text for identifiers or values with no agronomic meaning.
pub const UNCLASSIFIED_TEXT: &str = "N/A: Sem classificação agronômica disponível.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Ideal,
    High,
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub text: &'static str,
}

const UNCLASSIFIED: Classification = Classification {
    tier: Tier::Unclassified,
    text: UNCLASSIFIED_TEXT,
};

/// Classify a value by wire key. Never fails; unknown keys get the fallback.
pub fn classify(key: &str, value: f64) -> Classification {
    // ---
    match VariableId::from_key(key) {
        Some(id) => classify_id(id, value),
        None => UNCLASSIFIED,
    }
}

pub fn classify_id(id: VariableId, value: f64) -> Classification {
    // ---
    let bands = match &id.descriptor().rating {
        Rating::Informational(text) => {
            return Classification {
                tier: Tier::Unclassified,
                text: *text,
            }
        }
        Rating::Tiered(bands) => bands,
    };

    if !value.is_finite() {
        return UNCLASSIFIED;
    }

    if value < bands.low_below {
        Classification { tier: Tier::Low, text: bands.low_text }
    } else if value <= bands.high_above {
        Classification { tier: Tier::Ideal, text: bands.ideal_text }
    } else {
        Classification { tier: Tier::High, text: bands.high_text }
    }
}

/// One dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedVariable {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub value: f64,
    pub display_value: String,
    pub tier: Tier,
    pub text: &'static str,
    pub severity: Severity,
    pub badge_color: &'static str,
}

impl ClassifiedVariable {
    pub fn new(id: VariableId, value: f64) -> Self {
        // ---
        let descriptor = id.descriptor();
        let Classification { tier, text } = classify_id(id, value);

        ClassifiedVariable {
            key: descriptor.key,
            title: descriptor.title,
            icon: descriptor.icon,
            value,
            display_value: fixed_2(value),
            tier,
            text,
            severity: severity_of(id, value),
            badge_color: badge_color_of(id, value),
        }
    }
}

/// Two decimals; negative zero prints unsigned.
fn fixed_2(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// All twenty cards in wire order.
pub fn classify_reading(reading: &SensorReading) -> Vec<ClassifiedVariable> {
    // ---
    VariableId::ALL
        .iter()
        .map(|&id| ClassifiedVariable::new(id, reading.get(id)))
        .collect()
}

/// A validated reading and its classification, replaced wholesale per poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub fetched_at: DateTime<Utc>,
    pub reading: SensorReading,
    pub variables: Vec<ClassifiedVariable>,
}

impl Snapshot {
    pub fn new(reading: SensorReading, fetched_at: DateTime<Utc>) -> Self {
        Snapshot {
            fetched_at,
            variables: classify_reading(&reading),
            reading,
        }
    }

    pub fn variable(&self, key: &str) -> Option<&ClassifiedVariable> {
        self.variables.iter().find(|v| v.key == key)
    }
}
