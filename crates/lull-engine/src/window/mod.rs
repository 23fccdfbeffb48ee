//! Window and platform loop.
//!
//! Owns the winit event loop and the single application window, and runs
//! one input pass per loop iteration, drawing only when the scheduler says
//! so.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
