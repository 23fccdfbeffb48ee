//! lull engine crate.
//!
//! Platform loop, GPU rendering, redraw scheduling and the hot-swappable UI
//! module boundary used by the `lull` host.

pub mod core;
pub mod device;
pub mod input;
pub mod module;
pub mod sched;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
