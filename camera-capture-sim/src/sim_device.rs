use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use camera_capture_core::models::config::VideoConstraints;
use camera_capture_core::models::error::AcquisitionError;
use camera_capture_core::traits::device_provider::{DeviceProvider, MediaTrack, TrackState};

/// A simulated video track. Counts `stop` calls into the provider's shared
/// counter so tests can assert that every track of a released resource was
/// stopped.
pub struct SimTrack {
    id: String,
    ended: AtomicBool,
    stop_counter: Arc<AtomicUsize>,
}

impl MediaTrack for SimTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn state(&self) -> TrackState {
        if self.ended.load(Ordering::SeqCst) {
            TrackState::Ended
        } else {
            TrackState::Live
        }
    }

    fn stop(&self) {
        if !self.ended.swap(true, Ordering::SeqCst) {
            self.stop_counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// In-memory [`DeviceProvider`]: grants deterministic simulated tracks,
/// with scripted denials and an optional gate that holds the next grant
/// open so tests can interleave teardown with an in-flight acquisition.
pub struct SimDeviceProvider {
    supported: AtomicBool,
    track_count: usize,
    denials: Mutex<VecDeque<String>>,
    gate: Mutex<Option<Arc<Notify>>>,
    stop_counter: Arc<AtomicUsize>,
    grants: AtomicUsize,
    next_track_id: AtomicUsize,
}

impl SimDeviceProvider {
    pub fn new() -> Self {
        Self::with_track_count(1)
    }

    pub fn with_track_count(track_count: usize) -> Self {
        Self {
            supported: AtomicBool::new(true),
            track_count,
            denials: Mutex::new(VecDeque::new()),
            gate: Mutex::new(None),
            stop_counter: Arc::new(AtomicUsize::new(0)),
            grants: AtomicUsize::new(0),
            next_track_id: AtomicUsize::new(0),
        }
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    /// Script a denial for the next request (FIFO across requests).
    pub fn push_denial(&self, reason: impl Into<String>) {
        self.denials.lock().push_back(reason.into());
    }

    /// Hold the next grant open until the returned handle is notified.
    pub fn hold_next_grant(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Total number of distinct track stops observed across all grants.
    pub fn total_track_stops(&self) -> usize {
        self.stop_counter.load(Ordering::SeqCst)
    }

    pub fn grant_count(&self) -> usize {
        self.grants.load(Ordering::SeqCst)
    }
}

impl Default for SimDeviceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceProvider for SimDeviceProvider {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }

    async fn request_video(
        &self,
        _constraints: &VideoConstraints,
    ) -> Result<Vec<Box<dyn MediaTrack>>, AcquisitionError> {
        if let Some(reason) = self.denials.lock().pop_front() {
            log::debug!("sim device denying request: {}", reason);
            return Err(AcquisitionError::Denied(reason));
        }

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            // Keep the request suspended until the test releases it.
            gate.notified().await;
        } else {
            // A real platform request always suspends at least once.
            tokio::task::yield_now().await;
        }

        self.grants.fetch_add(1, Ordering::SeqCst);
        let tracks = (0..self.track_count)
            .map(|_| {
                let n = self.next_track_id.fetch_add(1, Ordering::SeqCst);
                Box::new(SimTrack {
                    id: format!("sim-video-{n}"),
                    ended: AtomicBool::new(false),
                    stop_counter: Arc::clone(&self.stop_counter),
                }) as Box<dyn MediaTrack>
            })
            .collect();
        Ok(tracks)
    }
}
