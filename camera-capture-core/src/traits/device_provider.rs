use async_trait::async_trait;

use crate::models::config::VideoConstraints;
use crate::models::error::AcquisitionError;

/// Lifecycle state of a single media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Live,
    Ended,
}

/// A single live track inside an acquired device stream.
///
/// Backends wrap their platform handle (V4L2 buffer queue, Media Foundation
/// source, `MediaStreamTrack`, ...) behind this. `stop` must be idempotent:
/// the session stops every track on release, retry, and teardown, and a
/// late-arriving resource is stopped after the fact.
pub trait MediaTrack: Send + Sync {
    fn id(&self) -> &str;

    fn state(&self) -> TrackState;

    /// Stop the track and release its share of the device.
    fn stop(&self);
}

/// Interface to the platform's exclusive video device.
///
/// Implemented by:
/// - `SimDeviceProvider` (camera-capture-sim, deterministic in-memory)
/// - future real backends (V4L2, Media Foundation, getUserMedia bridge)
#[async_trait]
pub trait DeviceProvider: Send + Sync {
    /// Whether the platform exposes video capture at all.
    ///
    /// Checked before any request so an unsupported platform fails without
    /// suspending.
    fn is_supported(&self) -> bool;

    /// Request exclusive video access, suspending until the platform grants
    /// or denies it. On grant, returns the live tracks of the stream.
    async fn request_video(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<Vec<Box<dyn MediaTrack>>, AcquisitionError>;
}
