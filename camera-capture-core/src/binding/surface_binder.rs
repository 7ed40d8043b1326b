use std::sync::Arc;

use parking_lot::Mutex;

use crate::acquisition::CaptureResource;
use crate::models::error::PlaybackError;
use crate::traits::render_surface::RenderSurface;

#[derive(Default)]
struct BinderState {
    bound_generation: Option<u64>,
    ready: bool,
    error: Option<PlaybackError>,
}

/// Attaches an acquired resource to a render surface and tracks readiness.
///
/// Readiness transitions: `unbound → attached(not ready) → ready`, where
/// `ready` requires stream metadata to have loaded AND the explicit play
/// command to have succeeded. A playback failure leaves the binding
/// attached but not ready, with the error stored.
///
/// Binding is idempotent per resource generation: re-binding the exact
/// resource already bound is a no-op, while a different resource detaches
/// the previous binding first. Readiness/error signals carry the
/// generation they belong to and are dropped when stale.
pub struct SurfaceBinder<S: RenderSurface> {
    surface: Arc<S>,
    state: Mutex<BinderState>,
}

impl<S: RenderSurface> SurfaceBinder<S> {
    pub fn new(surface: Arc<S>) -> Self {
        Self {
            surface,
            state: Mutex::new(BinderState::default()),
        }
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    /// Attach `resource` and drive it to readiness.
    ///
    /// On success the binding is ready unless it was superseded while a
    /// suspension was pending, in which case the late signal is discarded
    /// and readiness stays false.
    pub async fn bind(&self, resource: &CaptureResource) -> Result<(), PlaybackError> {
        let generation = resource.generation();
        {
            let mut state = self.state.lock();
            if state.bound_generation == Some(generation) {
                // Re-entry with the same resource instance: no-op.
                return Ok(());
            }
            if state.bound_generation.is_some() {
                log::debug!(
                    "replacing binding {:?} with generation {}",
                    state.bound_generation,
                    generation
                );
                self.surface.detach();
            }
            state.bound_generation = Some(generation);
            state.ready = false;
            state.error = None;
        }

        // No audio capture is ever desired, and playback stays inline.
        self.surface.set_muted(true);
        self.surface.set_inline_playback(true);
        self.surface.attach(resource);

        if let Err(err) = self.surface.await_metadata().await {
            self.record_failure(generation, err.clone());
            return Err(err);
        }

        if let Err(err) = self.surface.start_playback().await {
            self.record_failure(generation, err.clone());
            return Err(err);
        }

        let mut state = self.state.lock();
        if state.bound_generation == Some(generation) {
            state.ready = true;
            state.error = None;
            log::info!("surface ready (generation {})", generation);
        } else {
            log::debug!(
                "discarding stale readiness signal for generation {}",
                generation
            );
        }
        Ok(())
    }

    /// True only while the bound surface is decoding and playing.
    pub fn is_ready(&self) -> bool {
        self.state.lock().ready
    }

    pub fn bound_generation(&self) -> Option<u64> {
        self.state.lock().bound_generation
    }

    pub fn last_error(&self) -> Option<PlaybackError> {
        self.state.lock().error.clone()
    }

    /// Release the binding. Listeners are removed; the surface's displayed
    /// image is left untouched until the owner stops the resource.
    pub fn detach(&self) {
        let mut state = self.state.lock();
        if state.bound_generation.take().is_some() {
            self.surface.detach();
        }
        state.ready = false;
        state.error = None;
    }

    /// Apply a runtime surface error (decode failure, track ended) for the
    /// given generation. Returns whether the signal was applied; stale
    /// generations are ignored.
    pub fn report_playback_error(&self, generation: u64, error: PlaybackError) -> bool {
        let mut state = self.state.lock();
        if state.bound_generation != Some(generation) {
            log::debug!(
                "ignoring playback error from superseded generation {}: {}",
                generation,
                error
            );
            return false;
        }
        log::warn!("playback error (generation {}): {}", generation, error);
        state.ready = false;
        state.error = Some(error);
        true
    }

    fn record_failure(&self, generation: u64, error: PlaybackError) {
        let mut state = self.state.lock();
        if state.bound_generation == Some(generation) {
            state.ready = false;
            state.error = Some(error);
        }
    }
}
