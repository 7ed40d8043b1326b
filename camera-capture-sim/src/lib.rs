//! # camera-capture-sim
//!
//! Deterministic in-memory backend for camera-capture-core.
//!
//! Provides:
//! - `SimDeviceProvider` — scripted device grants/denials, gated grants for
//!   cancellation scenarios, per-track stop accounting
//! - `SimSurface` — fixed-resolution surface with scriptable metadata/play
//!   outcomes and a solid deterministic test fill
//! - `SimGeolocator` / `SimConditionsProvider` — canned overlay data
//!
//! Stands where a real platform backend (V4L2, Media Foundation, a
//! getUserMedia bridge) would plug in; useful headless and as the fixture
//! set for the integration test suite.
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use camera_capture_core::{CameraSession, SessionConfiguration};
//! use camera_capture_sim::{SimDeviceProvider, SimSurface};
//!
//! let provider = Arc::new(SimDeviceProvider::new());
//! let surface = Arc::new(SimSurface::new((640, 480)));
//! let session = CameraSession::new(provider, surface, SessionConfiguration::default())?;
//! ```

pub mod sim_device;
pub mod sim_overlay;
pub mod sim_surface;

pub use sim_device::{SimDeviceProvider, SimTrack};
pub use sim_overlay::{SimConditionsProvider, SimGeolocator};
pub use sim_surface::SimSurface;
