use async_trait::async_trait;
use image::RgbaImage;

use crate::acquisition::CaptureResource;
use crate::models::error::PlaybackError;

/// A renderable surface that can display a live capture resource.
///
/// The surface never owns the resource: `attach` takes a borrow, and the
/// session decides when the underlying tracks stop. Detaching removes the
/// source but deliberately leaves the last displayed image in place so a
/// resource swap does not flicker.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Point the surface at the resource's stream.
    fn attach(&self, resource: &CaptureResource);

    /// Drop the current source and its listeners. The displayed image is
    /// left untouched until the owner stops the resource.
    fn detach(&self);

    fn set_muted(&self, muted: bool);

    /// Request inline (non-fullscreen) playback.
    fn set_inline_playback(&self, inline_playback: bool);

    /// Suspend until stream metadata is available; returns the native
    /// resolution reported by the stream.
    async fn await_metadata(&self) -> Result<(u32, u32), PlaybackError>;

    /// Explicitly start playback. Readiness requires this to succeed.
    async fn start_playback(&self) -> Result<(), PlaybackError>;

    /// Native resolution of the attached stream, once metadata has loaded.
    fn native_resolution(&self) -> Option<(u32, u32)>;

    /// Rasterize the surface's current visual contents at the given size.
    fn copy_frame(&self, width: u32, height: u32) -> RgbaImage;
}
