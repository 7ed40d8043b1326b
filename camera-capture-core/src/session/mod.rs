pub mod camera_session;

pub use camera_session::CameraSession;
