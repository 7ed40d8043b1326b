use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::error::OverlayError;
use crate::models::overlay::{OverlayConditions, OverlaySnapshot};
use crate::traits::overlay_source::{ConditionsProvider, Geolocator};

/// Fetches current conditions and keeps the latest [`OverlaySnapshot`].
///
/// Resolution policy: geolocate (bounded by the configured timeout), fetch
/// by coordinates; if geolocation fails or times out, fetch by the fixed
/// default place name exactly once. No indefinite retries.
///
/// The agent is the snapshot's single writer. Readers (the session at
/// capture time, UI surfaces) take whatever is current and never wait for
/// an in-flight fetch. Overlay failures stay in the snapshot; they never
/// touch camera state.
pub struct OverlayAgent<G: Geolocator, C: ConditionsProvider> {
    geolocator: Arc<G>,
    conditions: Arc<C>,
    default_place: String,
    geolocation_timeout: Duration,
    snapshot: Mutex<OverlaySnapshot>,
}

impl<G: Geolocator, C: ConditionsProvider> OverlayAgent<G, C> {
    pub fn new(
        geolocator: Arc<G>,
        conditions: Arc<C>,
        default_place: impl Into<String>,
        geolocation_timeout: Duration,
    ) -> Self {
        Self {
            geolocator,
            conditions,
            default_place: default_place.into(),
            geolocation_timeout,
            snapshot: Mutex::new(OverlaySnapshot::default()),
        }
    }

    /// The current snapshot, cloned. Non-blocking.
    pub fn snapshot(&self) -> OverlaySnapshot {
        self.snapshot.lock().clone()
    }

    /// Refresh conditions. Marks the snapshot loading for the duration and
    /// records either the new conditions or the error.
    pub async fn refresh(&self) -> Result<(), OverlayError> {
        {
            let mut snapshot = self.snapshot.lock();
            snapshot.loading = true;
            snapshot.error = None;
        }

        let result = self.resolve_and_fetch().await;

        let mut snapshot = self.snapshot.lock();
        snapshot.loading = false;
        match result {
            Ok(conditions) => {
                log::info!(
                    "overlay conditions refreshed for {}",
                    conditions.location_name
                );
                snapshot.conditions = Some(conditions);
                snapshot.fetched_at = Some(chrono::Utc::now());
                Ok(())
            }
            Err(err) => {
                log::warn!("overlay refresh failed: {}", err);
                snapshot.error = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn resolve_and_fetch(&self) -> Result<OverlayConditions, OverlayError> {
        let position =
            match tokio::time::timeout(self.geolocation_timeout, self.geolocator.current_position())
                .await
            {
                Ok(Ok(position)) => position,
                Ok(Err(err)) => {
                    log::warn!(
                        "geolocation failed ({}), falling back to {:?}",
                        err,
                        self.default_place
                    );
                    return self.conditions.fetch_by_name(&self.default_place).await;
                }
                Err(_) => {
                    log::warn!(
                        "geolocation timed out after {:?}, falling back to {:?}",
                        self.geolocation_timeout,
                        self.default_place
                    );
                    return self.conditions.fetch_by_name(&self.default_place).await;
                }
            };

        self.conditions.fetch_by_coordinates(position).await
    }
}
