//! Time subsystem.
//!
//! Everything above the runtime speaks `f64` milliseconds since host start;
//! `HostClock` converts between that and `Instant` for timer-armed waits.

mod clock;

pub use clock::{FrameTime, HostClock};
