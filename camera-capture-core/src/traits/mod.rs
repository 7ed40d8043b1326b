pub mod device_provider;
pub mod overlay_source;
pub mod render_surface;
pub mod session_delegate;
