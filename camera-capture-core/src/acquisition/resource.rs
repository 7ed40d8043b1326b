use std::fmt;

use crate::traits::device_provider::{MediaTrack, TrackState};

/// An exclusively held device stream: the live tracks granted by the
/// platform, tagged with the acquisition generation that produced them.
///
/// Only the session creates or destroys one of these; the binder and
/// compositor borrow it. At most one active resource exists per session,
/// and `stop_all` is the only way a resource goes inactive.
pub struct CaptureResource {
    generation: u64,
    tracks: Vec<Box<dyn MediaTrack>>,
    stopped: bool,
}

impl CaptureResource {
    pub(crate) fn new(generation: u64, tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self {
            generation,
            tracks,
            stopped: false,
        }
    }

    /// The monotonic acquisition id this resource belongs to. Continuations
    /// resuming after a suspension compare this against the session's
    /// current generation to discard stale results.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tracks(&self) -> &[Box<dyn MediaTrack>] {
        &self.tracks
    }

    /// True while the resource holds at least one live, unstopped track.
    pub fn is_active(&self) -> bool {
        !self.stopped && self.tracks.iter().any(|t| t.state() == TrackState::Live)
    }

    /// Stop every track. Idempotent.
    pub fn stop_all(&mut self) {
        if self.stopped {
            return;
        }
        for track in &self.tracks {
            log::debug!("stopping track {} (generation {})", track.id(), self.generation);
            track.stop();
        }
        self.stopped = true;
    }
}

impl fmt::Debug for CaptureResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureResource")
            .field("generation", &self.generation)
            .field("tracks", &self.tracks.len())
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl Drop for CaptureResource {
    // Safety net only: the session releases explicitly on retry, error,
    // and teardown.
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTrack {
        id: String,
        stops: Arc<AtomicUsize>,
        ended: std::sync::atomic::AtomicBool,
    }

    impl CountingTrack {
        fn boxed(id: &str, stops: Arc<AtomicUsize>) -> Box<dyn MediaTrack> {
            Box::new(Self {
                id: id.into(),
                stops,
                ended: std::sync::atomic::AtomicBool::new(false),
            })
        }
    }

    impl MediaTrack for CountingTrack {
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
            self.stops.fetch_add(1, Ordering::SeqCst);
            self.ended.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn stop_all_stops_every_track_exactly_once() {
        let stops = Arc::new(AtomicUsize::new(0));
        let tracks = vec![
            CountingTrack::boxed("a", Arc::clone(&stops)),
            CountingTrack::boxed("b", Arc::clone(&stops)),
            CountingTrack::boxed("c", Arc::clone(&stops)),
        ];
        let mut resource = CaptureResource::new(1, tracks);
        assert!(resource.is_active());

        resource.stop_all();
        assert_eq!(stops.load(Ordering::SeqCst), 3);
        assert!(!resource.is_active());

        // Idempotent: a second release does not re-stop tracks.
        resource.stop_all();
        assert_eq!(stops.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn drop_stops_unreleased_tracks() {
        let stops = Arc::new(AtomicUsize::new(0));
        {
            let _resource =
                CaptureResource::new(7, vec![CountingTrack::boxed("a", Arc::clone(&stops))]);
        }
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
