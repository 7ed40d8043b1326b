use std::sync::Arc;

use crate::models::config::VideoConstraints;
use crate::models::error::AcquisitionError;
use crate::traits::device_provider::DeviceProvider;

use super::resource::CaptureResource;

/// Requests the exclusive video device and wraps the grant in a
/// [`CaptureResource`].
///
/// Each call is one self-contained attempt with no side effects beyond the
/// platform request itself. The session serializes calls (never two
/// in-flight acquisitions for one logical session) and owns cleanup of a
/// grant that arrives after teardown.
pub struct ResourceAcquirer<P: DeviceProvider> {
    provider: Arc<P>,
}

impl<P: DeviceProvider> ResourceAcquirer<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Acquire the device, tagging the result with the caller's monotonic
    /// acquisition id.
    ///
    /// An unsupported platform fails synchronously, before any suspension.
    pub async fn acquire(
        &self,
        constraints: &VideoConstraints,
        generation: u64,
    ) -> Result<CaptureResource, AcquisitionError> {
        if !self.provider.is_supported() {
            log::warn!("video capture unsupported on this platform");
            return Err(AcquisitionError::Unsupported);
        }

        log::info!(
            "requesting video device (generation {}, facing {:?}, ideal {}x{})",
            generation,
            constraints.facing,
            constraints.ideal_resolution.0,
            constraints.ideal_resolution.1
        );

        let tracks = self.provider.request_video(constraints).await?;
        if tracks.is_empty() {
            return Err(AcquisitionError::Denied(
                "platform granted a stream with no live tracks".into(),
            ));
        }

        log::info!(
            "device granted: {} track(s) (generation {})",
            tracks.len(),
            generation
        );
        Ok(CaptureResource::new(generation, tracks))
    }
}
