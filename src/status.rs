//! Visual severity of a reading, independent of the tier wording.

use serde::Serialize;

use crate::variables::{Rating, VariableId};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral; untiered or unknown variables.
    Info,
    Caution,
    Nominal,
    Warning,
}

/// Badge colour tokens used by the dashboard cards.
pub mod palette {
    pub const GRAY: &str = "bg-gray-500";
    pub const BLUE: &str = "bg-blue-500";
    pub const GREEN: &str = "bg-green-500";
    pub const YELLOW: &str = "bg-yellow-500";
    pub const RED: &str = "bg-red-500";
}

/// Severity for a wire key and value. Total: unknown keys and non-finite
/// values map to [`Severity::Info`].
pub fn severity(key: &str, value: f64) -> Severity {
    // ---
    match VariableId::from_key(key) {
        Some(id) => severity_of(id, value),
        None => Severity::Info,
    }
}

pub fn severity_of(id: VariableId, value: f64) -> Severity {
    // ---
    match &id.descriptor().rating {
        Rating::Informational(_) => Severity::Info,
        Rating::Tiered(_) if !value.is_finite() => Severity::Info,
        Rating::Tiered(b) if value < b.low_below => b.low,
        Rating::Tiered(b) if value <= b.high_above => b.ideal,
        Rating::Tiered(b) => b.high,
    }
}

/// Badge colour of a card. Per tier, not derived from the severity: a cold
/// reading and a humid one are both blue. Gray wherever [`severity_of`]
/// says [`Severity::Info`].
pub fn badge_color_of(id: VariableId, value: f64) -> &'static str {
    // ---
    match &id.descriptor().rating {
        Rating::Informational(_) => palette::GRAY,
        Rating::Tiered(_) if !value.is_finite() => palette::GRAY,
        Rating::Tiered(b) if value < b.low_below => b.low_color,
        Rating::Tiered(b) if value <= b.high_above => b.ideal_color,
        Rating::Tiered(b) => b.high_color,
    }
}
