use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;

use camera_capture_core::{
    CameraSession, CapturedFrame, OverlayAgent, OverlayError, SessionConfiguration, SessionState,
};
use camera_capture_sim::{SimConditionsProvider, SimDeviceProvider, SimGeolocator, SimSurface};

type SimSession = CameraSession<SimDeviceProvider, SimSurface>;
type SimOverlayAgent = OverlayAgent<SimGeolocator, SimConditionsProvider>;

const FILL: [u8; 4] = [120, 130, 140, 255];
const BAND_FILL: [u8; 4] = [60, 65, 70, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn ready_session(resolution: (u32, u32), config: SessionConfiguration) -> (SimSession, Arc<SimSurface>) {
    let provider = Arc::new(SimDeviceProvider::new());
    let surface = Arc::new(SimSurface::new(resolution));
    let session = CameraSession::new(provider, Arc::clone(&surface), config).unwrap();
    (session, surface)
}

fn overlay_agent(geolocator: SimGeolocator, conditions: Arc<SimConditionsProvider>) -> SimOverlayAgent {
    OverlayAgent::new(
        Arc::new(geolocator),
        conditions,
        "New York",
        Duration::from_secs(15),
    )
}

fn decode(frame: &CapturedFrame) -> RgbaImage {
    image::load_from_memory(&frame.encoded).unwrap().to_rgba8()
}

#[tokio::test]
async fn capture_without_overlay_matches_native_resolution_and_draws_no_band() {
    let (session, _surface) = ready_session((64, 48), SessionConfiguration::default());
    session.start().await.unwrap();

    let frame = session.capture(None).unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));

    let img = decode(&frame);
    assert!(img.pixels().all(|p| p.0 == FILL));
}

#[tokio::test]
async fn capture_passes_surface_pixels_through_unaltered() {
    let provider = Arc::new(SimDeviceProvider::new());
    let surface = Arc::new(SimSurface::with_fill(
        (100, 100),
        image::Rgba([200, 100, 50, 255]),
    ));
    let session =
        CameraSession::new(provider, Arc::clone(&surface), SessionConfiguration::default())
            .unwrap();
    session.start().await.unwrap();

    let frame = session.capture(None).unwrap();
    let img = decode(&frame);
    assert!(img.pixels().all(|p| p.0 == [200, 100, 50, 255]));

    // The band is an exact halving of whatever the surface shows.
    let conditions = Arc::new(SimConditionsProvider::clear_skies("Paris"));
    let agent = overlay_agent(SimGeolocator::at(48.85, 2.35), conditions);
    agent.refresh().await.unwrap();

    let banded = decode(&session.capture(Some(&agent.snapshot())).unwrap());
    let p = banded.get_pixel(99, 0).0;
    assert!(p == [100, 50, 25, 255] || p == WHITE);
    assert_eq!(banded.get_pixel(0, 15).0, [200, 100, 50, 255]);
}

#[tokio::test]
async fn overlay_band_is_composited_from_current_snapshot() {
    let (session, _surface) = ready_session((100, 100), SessionConfiguration::default());
    session.start().await.unwrap();

    let conditions = Arc::new(SimConditionsProvider::clear_skies("Paris"));
    let agent = overlay_agent(SimGeolocator::at(48.85, 2.35), Arc::clone(&conditions));
    agent.refresh().await.unwrap();

    let snapshot = agent.snapshot();
    let frame = session.capture(Some(&snapshot)).unwrap();
    let img = decode(&frame);

    // Band covers rows 0-14 on a 100-pixel-high buffer.
    for y in 0..15 {
        for x in 0..100 {
            let p = img.get_pixel(x, y).0;
            assert!(
                p == BAND_FILL || p == WHITE,
                "unexpected pixel {:?} at ({x}, {y})",
                p
            );
        }
    }
    for y in 15..100 {
        for x in 0..100 {
            assert_eq!(img.get_pixel(x, y).0, FILL);
        }
    }
    assert_eq!(conditions.coordinate_fetches(), 1);
}

#[tokio::test]
async fn overlay_flag_off_suppresses_the_band() {
    let config = SessionConfiguration {
        overlay_enabled: false,
        ..SessionConfiguration::default()
    };
    let (session, _surface) = ready_session((100, 100), config);
    session.start().await.unwrap();

    let agent = overlay_agent(
        SimGeolocator::at(48.85, 2.35),
        Arc::new(SimConditionsProvider::clear_skies("Paris")),
    );
    agent.refresh().await.unwrap();

    let frame = session.capture(Some(&agent.snapshot())).unwrap();
    let img = decode(&frame);
    assert!(img.pixels().all(|p| p.0 == FILL));
}

#[tokio::test]
async fn overlay_failure_never_touches_camera_state() {
    let (session, _surface) = ready_session((64, 48), SessionConfiguration::default());
    session.start().await.unwrap();

    let conditions = Arc::new(SimConditionsProvider::clear_skies("Paris"));
    conditions.fail_with(OverlayError::FetchFailed("api down".into()));
    let agent = overlay_agent(SimGeolocator::at(48.85, 2.35), Arc::clone(&conditions));

    let err = agent.refresh().await.unwrap_err();
    assert!(matches!(err, OverlayError::FetchFailed(_)));

    // Camera untouched; capture proceeds without a band.
    assert_eq!(session.state(), SessionState::Ready);
    let frame = session.capture(Some(&agent.snapshot())).unwrap();
    let img = decode(&frame);
    assert!(img.pixels().all(|p| p.0 == FILL));
}

#[tokio::test]
async fn geolocation_fallback_reaches_the_default_place() {
    let conditions = Arc::new(SimConditionsProvider::clear_skies("Paris"));
    let agent = overlay_agent(
        SimGeolocator::unavailable("permission denied"),
        Arc::clone(&conditions),
    );

    agent.refresh().await.unwrap();

    let snapshot = agent.snapshot();
    assert_eq!(snapshot.renderable().unwrap().location_name, "New York");
    assert_eq!(conditions.coordinate_fetches(), 0);
    assert_eq!(conditions.name_fetches(), 1);
}

#[tokio::test]
async fn identical_captures_share_a_checksum() {
    let (session, _surface) = ready_session((100, 100), SessionConfiguration::default());
    session.start().await.unwrap();

    let agent = overlay_agent(
        SimGeolocator::at(48.85, 2.35),
        Arc::new(SimConditionsProvider::clear_skies("Paris")),
    );
    agent.refresh().await.unwrap();
    let snapshot = agent.snapshot();

    let first = session.capture(Some(&snapshot)).unwrap();
    session.discard();
    let second = session.capture(Some(&snapshot)).unwrap();

    assert_eq!(first.encoded, second.encoded);
    assert_eq!(first.checksum, second.checksum);
}
