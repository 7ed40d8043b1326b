//! # camera-capture-core
//!
//! Platform-agnostic camera capture core library.
//!
//! Provides the device acquisition lifecycle, surface binding, still-frame
//! compositing, and the session state machine. Platform backends (V4L2,
//! Media Foundation, a getUserMedia bridge, or the in-memory simulator in
//! `camera-capture-sim`) implement the collaborator traits and plug into
//! the generic `CameraSession`.
//!
//! ## Architecture
//!
//! ```text
//! camera-capture-core (this crate)
//! ├── traits/       ← DeviceProvider, RenderSurface, SessionDelegate, Geolocator, ConditionsProvider
//! ├── models/       ← errors, SessionState, SessionConfiguration, CapturedFrame, OverlaySnapshot
//! ├── acquisition/  ← ResourceAcquirer, CaptureResource
//! ├── binding/      ← SurfaceBinder (attach, readiness, playback errors)
//! ├── compositing/  ← FrameCompositor (surface snapshot + weather band + PNG)
//! ├── overlay/      ← OverlayAgent (geolocation-first conditions fetch)
//! └── session/      ← CameraSession (generic orchestrator)
//! ```

pub mod acquisition;
pub mod binding;
pub mod compositing;
pub mod models;
pub mod overlay;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use acquisition::{CaptureResource, ResourceAcquirer};
pub use binding::SurfaceBinder;
pub use compositing::FrameCompositor;
pub use models::config::{FacingMode, SessionConfiguration, VideoConstraints};
pub use models::error::{
    AcquisitionError, CaptureError, OverlayError, PlaybackError, SessionError,
};
pub use models::frame::{CapturedFrame, FrameMetadata};
pub use models::overlay::{Coordinates, OverlayConditions, OverlaySnapshot};
pub use models::state::SessionState;
pub use overlay::OverlayAgent;
pub use session::CameraSession;
pub use traits::device_provider::{DeviceProvider, MediaTrack, TrackState};
pub use traits::overlay_source::{ConditionsProvider, Geolocator};
pub use traits::render_surface::RenderSurface;
pub use traits::session_delegate::SessionDelegate;
