use super::error::SessionError;

/// Camera session state machine.
///
/// State transitions:
/// ```text
/// idle → acquiring → bound → ready ⇄ captured
///            ↓         ↓       ↓
///            └──── error ──────┘   (retry → acquiring)
///
/// any state → stopped (teardown, terminal)
/// ```
///
/// `Captured` overlays `Ready`: the live feed keeps running underneath a
/// held still frame, and discarding the frame returns to `Ready`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Acquiring,
    /// Resource attached to the surface, readiness not yet reported.
    Bound,
    /// Surface is decoding and displaying live frames; capture is valid.
    Ready,
    /// A still frame is held while the live feed keeps running.
    Captured,
    Error(SessionError),
    /// Terminal. The resource has been released and will not be reacquired.
    Stopped,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(self, Self::Acquiring)
    }

    /// True in both `Ready` and `Captured` (the feed is live in both).
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Ready | Self::Captured)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// The error carried by the `Error` state, if any.
    pub fn error(&self) -> Option<&SessionError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Whether an explicit retry may start a new acquisition from here.
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Idle | Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::AcquisitionError;

    #[test]
    fn live_covers_ready_and_captured() {
        assert!(SessionState::Ready.is_live());
        assert!(SessionState::Captured.is_live());
        assert!(!SessionState::Bound.is_live());
        assert!(!SessionState::Stopped.is_live());
    }

    #[test]
    fn retry_only_from_idle_or_error() {
        assert!(SessionState::Idle.can_retry());
        assert!(SessionState::Error(AcquisitionError::Unsupported.into()).can_retry());
        assert!(!SessionState::Acquiring.can_retry());
        assert!(!SessionState::Ready.can_retry());
        assert!(!SessionState::Stopped.can_retry());
    }
}
