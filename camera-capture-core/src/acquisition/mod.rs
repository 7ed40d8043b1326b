pub mod acquirer;
pub mod resource;

pub use acquirer::ResourceAcquirer;
pub use resource::CaptureResource;
