mod font;

pub mod compositor;

pub use compositor::{FrameCompositor, DEFAULT_RESOLUTION};
