pub mod surface_binder;

pub use surface_binder::SurfaceBinder;
