use std::sync::Arc;

use parking_lot::Mutex;

use crate::acquisition::{CaptureResource, ResourceAcquirer};
use crate::binding::SurfaceBinder;
use crate::compositing::FrameCompositor;
use crate::models::config::SessionConfiguration;
use crate::models::error::{CaptureError, PlaybackError, SessionError};
use crate::models::frame::CapturedFrame;
use crate::models::overlay::OverlaySnapshot;
use crate::models::state::SessionState;
use crate::traits::device_provider::DeviceProvider;
use crate::traits::render_surface::RenderSurface;
use crate::traits::session_delegate::SessionDelegate;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// The lock is never held across an await; async flows snapshot the
/// generation, suspend, and re-check it on resumption.
struct Inner {
    state: SessionState,
    resource: Option<CaptureResource>,
    /// Monotonic acquisition id. Bumped by every new attempt and by
    /// teardown; a continuation whose tag no longer matches is stale and
    /// its result is discarded (stopping any late-arriving resource).
    generation: u64,
    /// Counts explicit user retries only. Never incremented implicitly.
    retry_count: u64,
    /// Serialization guard: at most one acquisition in flight.
    acquiring: bool,
    frame: Option<CapturedFrame>,
}

/// Top-level controller for one camera session.
///
/// Owns the exclusive [`CaptureResource`] for its whole lifetime and is the
/// only component that creates or destroys it; the binder and compositor
/// borrow. Composes acquisition, surface binding, and frame capture into
/// the state machine documented on [`SessionState`].
///
/// ```text
/// [DeviceProvider] → ResourceAcquirer → CaptureResource
///                                           │
///                  SurfaceBinder ← attach ──┘
///                        │ ready
///                  FrameCompositor → CapturedFrame
/// ```
pub struct CameraSession<P: DeviceProvider, S: RenderSurface> {
    acquirer: ResourceAcquirer<P>,
    binder: SurfaceBinder<S>,
    compositor: FrameCompositor,
    config: SessionConfiguration,
    delegate: Mutex<Option<Arc<dyn SessionDelegate>>>,
    inner: Mutex<Inner>,
}

impl<P: DeviceProvider, S: RenderSurface> CameraSession<P, S> {
    /// Create a session over the given platform collaborators.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(
        provider: Arc<P>,
        surface: Arc<S>,
        config: SessionConfiguration,
    ) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            acquirer: ResourceAcquirer::new(provider),
            binder: SurfaceBinder::new(surface),
            compositor: FrameCompositor::new(),
            config,
            delegate: Mutex::new(None),
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                resource: None,
                generation: 0,
                retry_count: 0,
                acquiring: false,
                frame: None,
            }),
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn SessionDelegate>) {
        *self.delegate.lock() = Some(delegate);
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    /// True while the surface is decoding and displaying live frames.
    pub fn is_ready(&self) -> bool {
        self.binder.is_ready()
    }

    pub fn retry_count(&self) -> u64 {
        self.inner.lock().retry_count
    }

    /// The held still frame, while in `Captured`.
    pub fn frame(&self) -> Option<CapturedFrame> {
        self.inner.lock().frame.clone()
    }

    /// Mount the session: `Idle → Acquiring → Bound → Ready`, or `Error`.
    pub async fn start(&self) -> Result<(), SessionError> {
        {
            let inner = self.inner.lock();
            if !inner.state.is_idle() {
                return Err(SessionError::InvalidOperation(format!(
                    "start is only valid from idle, current state {:?}",
                    inner.state
                )));
            }
        }
        self.run_acquisition().await
    }

    /// Explicit user retry: bumps the retry counter, fully releases any
    /// held resource, then re-acquires. Only valid from `Idle` or `Error`.
    pub async fn retry(&self) -> Result<(), SessionError> {
        {
            let mut inner = self.inner.lock();
            if !inner.state.can_retry() {
                return Err(SessionError::InvalidOperation(format!(
                    "retry is only valid from idle or error, current state {:?}",
                    inner.state
                )));
            }
            inner.retry_count += 1;
            log::info!("user retry #{}", inner.retry_count);
            // Full release before re-acquisition: no two resources may be
            // active at once.
            if let Some(mut resource) = inner.resource.take() {
                resource.stop_all();
            }
            inner.frame = None;
        }
        self.binder.detach();
        self.run_acquisition().await
    }

    /// Snapshot the surface into a still frame.
    ///
    /// Valid in `Ready` or `Captured` (a new capture replaces the held
    /// frame; the live feed keeps running underneath). Reads whatever
    /// overlay snapshot is current; never waits for an in-flight fetch.
    /// Errors are returned synchronously and mutate nothing.
    pub fn capture(
        &self,
        overlay: Option<&OverlaySnapshot>,
    ) -> Result<CapturedFrame, CaptureError> {
        {
            let inner = self.inner.lock();
            if !inner.state.is_live() {
                return Err(CaptureError::NotReady);
            }
        }
        if !self.binder.is_ready() {
            return Err(CaptureError::NotReady);
        }

        let conditions = if self.config.overlay_enabled {
            overlay.and_then(|snapshot| snapshot.renderable())
        } else {
            None
        };

        let frame = self
            .compositor
            .capture(self.binder.surface().as_ref(), conditions)?;

        {
            let mut inner = self.inner.lock();
            // Teardown may have raced the snapshot; reject rather than
            // holding a frame for a stopped session.
            if !inner.state.is_live() {
                return Err(CaptureError::NotReady);
            }
            inner.frame = Some(frame.clone());
            inner.state = SessionState::Captured;
        }
        // Clone out before invoking so the delegate lock is not held
        // across the callbacks.
        let delegate = self.delegate.lock().clone();
        if let Some(delegate) = delegate {
            delegate.on_state_changed(&SessionState::Captured);
            delegate.on_frame_captured(&frame);
        }
        Ok(frame)
    }

    /// Drop the held frame: `Captured → Ready`. No-op elsewhere.
    pub fn discard(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.state != SessionState::Captured {
                return;
            }
            inner.frame = None;
            inner.state = SessionState::Ready;
        }
        let delegate = self.delegate.lock().clone();
        if let Some(delegate) = delegate {
            delegate.on_state_changed(&SessionState::Ready);
        }
    }

    /// Teardown: release the resource synchronously and enter the terminal
    /// `Stopped` state. Valid from any state; idempotent. An acquisition
    /// still in flight is invalidated and its eventual grant stopped on
    /// arrival.
    pub fn stop(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.state.is_stopped() {
                return;
            }
            inner.generation += 1;
            inner.acquiring = false;
            if let Some(mut resource) = inner.resource.take() {
                resource.stop_all();
            }
            inner.frame = None;
        }
        let was_ready = self.binder.is_ready();
        self.binder.detach();
        if was_ready {
            self.notify_ready(false);
        }
        self.set_state(SessionState::Stopped);
        log::info!("session torn down");
    }

    /// Entry point for runtime surface errors pushed by the backend
    /// (decode failure, track ended). A stale generation is ignored; a
    /// current one terminates the session into `Error`.
    pub fn report_playback_error(&self, generation: u64, error: PlaybackError) {
        if self.binder.report_playback_error(generation, error.clone()) {
            self.fail(error.into());
        }
    }

    // --- Internal helpers ---

    async fn run_acquisition(&self) -> Result<(), SessionError> {
        let generation = {
            let mut inner = self.inner.lock();
            if inner.acquiring {
                return Err(SessionError::InvalidOperation(
                    "an acquisition is already in flight".into(),
                ));
            }
            inner.acquiring = true;
            inner.generation += 1;
            inner.frame = None;
            inner.generation
        };
        self.set_state(SessionState::Acquiring);

        let acquired = self
            .acquirer
            .acquire(&self.config.constraints, generation)
            .await;

        // Resumption after the acquisition suspension: discard if stale.
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                drop(inner);
                if let Ok(mut resource) = acquired {
                    log::debug!(
                        "stopping late-arriving resource from superseded generation {}",
                        generation
                    );
                    resource.stop_all();
                }
                return Ok(());
            }
            match acquired {
                Ok(resource) => {
                    inner.resource = Some(resource);
                }
                Err(err) => {
                    inner.acquiring = false;
                    drop(inner);
                    let err: SessionError = err.into();
                    self.fail(err.clone());
                    return Err(err);
                }
            }
        }
        self.set_state(SessionState::Bound);

        // Take the resource out for the duration of the bind so no lock is
        // held across the metadata/play suspensions; teardown during the
        // bind is detected by the generation check on the way back in.
        let resource = match self.inner.lock().resource.take() {
            Some(resource) => resource,
            None => return Ok(()), // torn down between transitions
        };
        let bind_result = self.binder.bind(&resource).await;

        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                drop(inner);
                let mut resource = resource;
                log::debug!(
                    "stopping resource from superseded bind (generation {})",
                    generation
                );
                resource.stop_all();
                self.binder.detach();
                return Ok(());
            }
            inner.resource = Some(resource);
            inner.acquiring = false;
        }

        match bind_result {
            Ok(()) => {
                if self.binder.is_ready() {
                    self.set_state(SessionState::Ready);
                    self.notify_ready(true);
                }
                Ok(())
            }
            Err(err) => {
                let err: SessionError = err.into();
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Transition into `Error`: stop and drop the resource, detach the
    /// binding, surface the error.
    fn fail(&self, error: SessionError) {
        {
            let mut inner = self.inner.lock();
            inner.acquiring = false;
            if let Some(mut resource) = inner.resource.take() {
                resource.stop_all();
            }
            inner.frame = None;
        }
        let was_ready = self.binder.is_ready();
        self.binder.detach();
        if was_ready {
            self.notify_ready(false);
        }
        log::error!("session error: {}", error);
        self.set_state(SessionState::Error(error));
    }

    fn set_state(&self, new_state: SessionState) {
        {
            self.inner.lock().state = new_state.clone();
        }
        log::debug!("session state → {:?}", new_state);
        let delegate = self.delegate.lock().clone();
        if let Some(delegate) = delegate {
            delegate.on_state_changed(&new_state);
            if let SessionState::Error(err) = &new_state {
                delegate.on_error(err);
            }
        }
    }

    fn notify_ready(&self, ready: bool) {
        let delegate = self.delegate.lock().clone();
        if let Some(delegate) = delegate {
            delegate.on_ready_changed(ready);
        }
    }
}

impl<P: DeviceProvider, S: RenderSurface> Drop for CameraSession<P, S> {
    // Safety net: no resource may outlive its owning session. Explicit
    // `stop()` remains the normal teardown path.
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if let Some(mut resource) = inner.resource.take() {
            resource.stop_all();
        }
    }
}
