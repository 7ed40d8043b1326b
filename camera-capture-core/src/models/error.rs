use thiserror::Error;

/// Errors from requesting the exclusive video device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The platform exposes no video capture capability at all.
    /// Reported synchronously, before any request is issued.
    #[error("video capture is not supported on this platform")]
    Unsupported,

    /// The platform refused the request (permission denied, device busy,
    /// request timed out).
    #[error("device access denied: {0}")]
    Denied(String),
}

/// Errors from the render surface after a resource is attached.
///
/// Distinct from [`AcquisitionError`]: the device was granted, but the
/// surface failed to decode or keep the stream alive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("surface failed to decode the stream: {0}")]
    DecodeFailed(String),

    #[error("video track ended unexpectedly")]
    TrackEnded,
}

/// Errors from snapshotting the surface into a still frame.
///
/// Returned synchronously to the caller of `capture()`; never mutates
/// session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The binding is not ready (or the session is tearing down).
    #[error("capture requested while the surface is not ready")]
    NotReady,

    #[error("frame encoding failed: {0}")]
    EncodeFailed(String),
}

/// Errors from the overlay data fetch. Fully local to the overlay:
/// they disable the weather band but never touch camera state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("conditions fetch failed: {0}")]
    FetchFailed(String),
}

/// Errors surfaced by the session orchestrator.
///
/// `Acquisition` and `Playback` terminate the active session into the
/// `Error` state and carry a retry affordance. `InvalidOperation` is
/// returned synchronously for a call made in the wrong state and never
/// enters the state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_wraps_both_families() {
        let a: SessionError = AcquisitionError::Unsupported.into();
        assert!(matches!(a, SessionError::Acquisition(_)));

        let p: SessionError = PlaybackError::TrackEnded.into();
        assert!(matches!(p, SessionError::Playback(_)));
    }

    #[test]
    fn denied_preserves_reason() {
        let err = AcquisitionError::Denied("NotAllowedError".into());
        assert_eq!(err.to_string(), "device access denied: NotAllowedError");
    }
}
