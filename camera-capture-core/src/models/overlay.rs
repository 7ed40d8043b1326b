use serde::{Deserialize, Serialize};

use super::error::OverlayError;

/// A point on the globe, as reported by the geolocation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current weather conditions for a resolved location.
///
/// The capture band renders only the location name, temperature, and
/// description; the remaining fields are exposed for UI display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConditions {
    pub location_name: String,
    /// Degrees, integral as delivered by the conditions API.
    pub temperature: i32,
    pub description: String,
    /// Relative humidity, percent.
    pub humidity: u32,
    pub wind_speed: f32,
    pub feels_like: i32,
}

/// The most recently fetched overlay data, plus fetch status.
///
/// Written only by the overlay agent; the compositor reads whatever is
/// current at capture time and never waits for an in-flight fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlaySnapshot {
    pub conditions: Option<OverlayConditions>,
    pub loading: bool,
    pub error: Option<OverlayError>,
    /// When `conditions` was last refreshed.
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl OverlaySnapshot {
    /// Conditions that are safe to composite: present, settled, not errored.
    pub fn renderable(&self) -> Option<&OverlayConditions> {
        if self.loading || self.error.is_some() {
            return None;
        }
        self.conditions.as_ref()
    }
}
