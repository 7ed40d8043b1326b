use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use camera_capture_core::models::error::OverlayError;
use camera_capture_core::models::overlay::{Coordinates, OverlayConditions};
use camera_capture_core::traits::overlay_source::{ConditionsProvider, Geolocator};

/// Geolocator returning a fixed outcome.
pub struct SimGeolocator {
    result: Mutex<Result<Coordinates, OverlayError>>,
}

impl SimGeolocator {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            result: Mutex::new(Ok(Coordinates {
                latitude,
                longitude,
            })),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            result: Mutex::new(Err(OverlayError::LocationUnavailable(reason.into()))),
        }
    }
}

#[async_trait]
impl Geolocator for SimGeolocator {
    async fn current_position(&self) -> Result<Coordinates, OverlayError> {
        tokio::task::yield_now().await;
        self.result.lock().clone()
    }
}

/// Conditions provider serving canned weather, keyed by request kind.
///
/// Coordinate lookups resolve to the configured conditions as-is; name
/// lookups echo the requested place back as the location name, the way a
/// real geocoding weather API would.
pub struct SimConditionsProvider {
    conditions: OverlayConditions,
    fail: Mutex<Option<OverlayError>>,
    coordinate_fetches: AtomicUsize,
    name_fetches: AtomicUsize,
}

impl SimConditionsProvider {
    pub fn new(conditions: OverlayConditions) -> Self {
        Self {
            conditions,
            fail: Mutex::new(None),
            coordinate_fetches: AtomicUsize::new(0),
            name_fetches: AtomicUsize::new(0),
        }
    }

    /// Canned mild conditions, handy default for tests and demos.
    pub fn clear_skies(location: impl Into<String>) -> Self {
        Self::new(OverlayConditions {
            location_name: location.into(),
            temperature: 18,
            description: "Clear".into(),
            humidity: 40,
            wind_speed: 3.5,
            feels_like: 17,
        })
    }

    /// Script every subsequent fetch to fail.
    pub fn fail_with(&self, error: OverlayError) {
        *self.fail.lock() = Some(error);
    }

    pub fn coordinate_fetches(&self) -> usize {
        self.coordinate_fetches.load(Ordering::SeqCst)
    }

    pub fn name_fetches(&self) -> usize {
        self.name_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConditionsProvider for SimConditionsProvider {
    async fn fetch_by_coordinates(
        &self,
        _position: Coordinates,
    ) -> Result<OverlayConditions, OverlayError> {
        tokio::task::yield_now().await;
        self.coordinate_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fail.lock().clone() {
            return Err(error);
        }
        Ok(self.conditions.clone())
    }

    async fn fetch_by_name(&self, place: &str) -> Result<OverlayConditions, OverlayError> {
        tokio::task::yield_now().await;
        self.name_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fail.lock().clone() {
            return Err(error);
        }
        let mut conditions = self.conditions.clone();
        conditions.location_name = place.to_string();
        Ok(conditions)
    }
}
