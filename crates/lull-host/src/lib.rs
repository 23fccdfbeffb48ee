//! lull host: opens the window, runs the frame scheduler, and drives the
//! hot-reloadable UI module through its C boundary.

pub mod bridge;
pub mod config;
pub mod host;
pub mod session;

pub use config::HostConfig;
pub use host::UiHost;
