use async_trait::async_trait;

use crate::models::error::OverlayError;
use crate::models::overlay::{Coordinates, OverlayConditions};

/// Resolves the device's current position.
///
/// The overlay agent bounds this call with its configured timeout; a slow
/// or absent geolocation service degrades to the place-name fallback.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, OverlayError>;
}

/// Supplies current weather conditions for a coordinate or a place name.
///
/// The HTTP mechanics live entirely in the backend; the core only sees this
/// contract.
#[async_trait]
pub trait ConditionsProvider: Send + Sync {
    async fn fetch_by_coordinates(
        &self,
        position: Coordinates,
    ) -> Result<OverlayConditions, OverlayError>;

    async fn fetch_by_name(&self, place: &str) -> Result<OverlayConditions, OverlayError>;
}
