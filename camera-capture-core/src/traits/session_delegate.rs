use crate::models::error::SessionError;
use crate::models::frame::CapturedFrame;
use crate::models::state::SessionState;

/// Event delegate for camera session notifications.
///
/// The session is the single writer of all reported state; implementations
/// only observe. Callbacks fire on the session's task, so keep them short.
pub trait SessionDelegate: Send + Sync {
    /// Called on every state machine transition.
    fn on_state_changed(&self, state: &SessionState);

    /// Called when binder readiness flips. `ready == true` implies the
    /// surface is decoding and displaying live frames.
    fn on_ready_changed(&self, ready: bool);

    /// Called when the session enters the `Error` state.
    fn on_error(&self, error: &SessionError);

    /// Called after a successful capture, with the frame the session holds.
    fn on_frame_captured(&self, frame: &CapturedFrame);
}
