use anyhow::Result;

use crate::module::FrameFence;

use super::ctx::{FrameCtx, FrameOutcome, ProcessCtx};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`crate::window::Runtime`].
///
/// An `Err` from any callback stops the loop; `Runtime::run` returns it.
pub trait App {
    /// Start of an iteration, before any pass. `fence` waits for the GPU to
    /// finish the last submitted frame.
    fn refresh(&mut self, fence: &mut dyn FrameFence) {
        let _ = fence;
    }

    /// Input pass. Fold staleness into `ctx.report`.
    fn process(&mut self, ctx: &mut ProcessCtx<'_>) -> Result<AppControl>;

    /// Display pass; usually a single [`FrameCtx::render`] call.
    fn display(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<FrameOutcome>;

    /// Longest the loop may sleep regardless of the schedule, for
    /// applications that poll something outside the event stream.
    fn wake_interval_ms(&self) -> Option<f64> {
        None
    }
}
