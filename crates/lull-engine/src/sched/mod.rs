//! Demand-driven redraw scheduling.
//!
//! The runtime asks the scheduler once per loop iteration whether to draw.
//! Redraws happen only while frames are outstanding or the last presented
//! output has expired; otherwise the loop sleeps until the expiry deadline
//! or the next input event, whichever comes first.

mod scheduler;

pub use scheduler::{host_report, Decision, FrameScheduler, SchedulerState};
