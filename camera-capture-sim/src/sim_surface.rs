use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use camera_capture_core::acquisition::CaptureResource;
use camera_capture_core::models::error::PlaybackError;
use camera_capture_core::traits::render_surface::RenderSurface;

#[derive(Default)]
struct SurfaceState {
    attached_generation: Option<u64>,
    muted: bool,
    inline_playback: bool,
    metadata_loaded: bool,
    playing: bool,
}

/// In-memory [`RenderSurface`]: a fixed-resolution surface showing a solid
/// test fill once a stream is attached. Metadata and play outcomes are
/// scriptable so binder failure paths can be exercised headless.
pub struct SimSurface {
    resolution: (u32, u32),
    fill: Rgba<u8>,
    state: Mutex<SurfaceState>,
    fail_metadata: Mutex<Option<PlaybackError>>,
    fail_play: Mutex<Option<PlaybackError>>,
}

impl SimSurface {
    pub fn new(resolution: (u32, u32)) -> Self {
        Self {
            resolution,
            fill: Rgba([120, 130, 140, 255]),
            state: Mutex::new(SurfaceState::default()),
            fail_metadata: Mutex::new(None),
            fail_play: Mutex::new(None),
        }
    }

    pub fn with_fill(resolution: (u32, u32), fill: Rgba<u8>) -> Self {
        Self {
            fill,
            ..Self::new(resolution)
        }
    }

    /// Script the next metadata wait to fail.
    pub fn fail_next_metadata(&self, error: PlaybackError) {
        *self.fail_metadata.lock() = Some(error);
    }

    /// Script the next play command to fail.
    pub fn fail_next_play(&self, error: PlaybackError) {
        *self.fail_play.lock() = Some(error);
    }

    pub fn attached_generation(&self) -> Option<u64> {
        self.state.lock().attached_generation
    }

    pub fn is_muted(&self) -> bool {
        self.state.lock().muted
    }

    pub fn is_inline_playback(&self) -> bool {
        self.state.lock().inline_playback
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }
}

#[async_trait]
impl RenderSurface for SimSurface {
    fn attach(&self, resource: &CaptureResource) {
        let mut state = self.state.lock();
        state.attached_generation = Some(resource.generation());
        state.metadata_loaded = false;
        state.playing = false;
    }

    fn detach(&self) {
        // The displayed image (our fill) deliberately survives a detach.
        let mut state = self.state.lock();
        state.attached_generation = None;
        state.playing = false;
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn set_inline_playback(&self, inline_playback: bool) {
        self.state.lock().inline_playback = inline_playback;
    }

    async fn await_metadata(&self) -> Result<(u32, u32), PlaybackError> {
        tokio::task::yield_now().await;
        if let Some(error) = self.fail_metadata.lock().take() {
            return Err(error);
        }
        self.state.lock().metadata_loaded = true;
        Ok(self.resolution)
    }

    async fn start_playback(&self) -> Result<(), PlaybackError> {
        tokio::task::yield_now().await;
        if let Some(error) = self.fail_play.lock().take() {
            return Err(error);
        }
        self.state.lock().playing = true;
        Ok(())
    }

    fn native_resolution(&self) -> Option<(u32, u32)> {
        let state = self.state.lock();
        if state.metadata_loaded {
            Some(self.resolution)
        } else {
            None
        }
    }

    fn copy_frame(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, self.fill)
    }
}
