//! Contract between the runtime loop and the application on top of it.
//!
//! Every loop iteration runs an input-processing pass that yields a
//! [`lull_api::Report`]; the scheduler then decides whether a display pass
//! follows. The application never sees winit or wgpu setup directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, FrameOutcome, ProcessCtx};
