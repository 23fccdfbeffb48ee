//! GPU device and surface.
//!
//! Owns the wgpu objects for the single window, hands out per-frame encoders
//! and remembers the last submission so a module reload can wait until the
//! GPU is done with everything the old code produced.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
