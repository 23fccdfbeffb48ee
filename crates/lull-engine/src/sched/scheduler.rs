use lull_api::{Display, Report};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Idle,
    Rendering,
}

/// The host's own contribution to an iteration's report, before the
/// application folds in the module's. A resized surface holds stale pixels,
/// so it is always dirty.
pub fn host_report(display: &Display) -> Report {
    let mut report = Report::default();
    if display.resized {
        report.mark_dirty();
    }
    report
}

/// Outcome of [`FrameScheduler::plan`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Decision {
    /// Run the display pass and present; then call
    /// [`FrameScheduler::presented`].
    Redraw,
    /// Nothing to draw. Sleep until `deadline_ms` (absolute, host clock) or
    /// until input arrives. `timeout_ms` is `None` when only input can wake
    /// the loop.
    Wait {
        deadline_ms: f64,
        timeout_ms: Option<f64>,
    },
}

impl Decision {
    #[inline]
    pub fn is_redraw(&self) -> bool {
        matches!(self, Decision::Redraw)
    }
}

/// Host-side redraw controller.
///
/// Keeps two values across iterations:
/// - `outdated_frames_end`: the first frame id that is no longer known to be
///   stale. Reports extend it, never shrink it.
/// - `validity_deadline_ms`: absolute time after which the presented output
///   is stale. Reports tighten it; presenting a frame clears it.
///
/// Construction leaves one outdated frame pending so the first iteration
/// always draws.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame_id: u64,
    outdated_frames_end: u64,
    validity_deadline_ms: f64,
    state: SchedulerState,
    presented_frames: u64,
    skipped_frames: u64,
}

impl FrameScheduler {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frame_id: 0,
            outdated_frames_end: 1,
            validity_deadline_ms: now_ms,
            state: SchedulerState::Idle,
            presented_frames: 0,
            skipped_frames: 0,
        }
    }

    /// Id of the frame the next display pass will produce.
    #[inline]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    #[inline]
    pub fn outdated_frames_end(&self) -> u64 {
        self.outdated_frames_end
    }

    #[inline]
    pub fn validity_deadline_ms(&self) -> f64 {
        self.validity_deadline_ms
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    #[inline]
    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    /// Forces the next plan to redraw (OS expose, surface reconfigure).
    pub fn force_redraw(&mut self) {
        self.outdated_frames_end = self.outdated_frames_end.max(self.frame_id.wrapping_add(1));
    }

    /// Folds the input pass's report into the schedule and decides.
    pub fn plan(&mut self, now_ms: f64, report: &Report) -> Decision {
        let n = u64::try_from(report.outdated_frames_n).unwrap_or(0);
        self.outdated_frames_end = self.outdated_frames_end.max(self.frame_id.wrapping_add(n));

        let candidate = now_ms + report.validity_ms;
        if candidate < self.validity_deadline_ms {
            self.validity_deadline_ms = candidate;
        }

        if self.frame_id < self.outdated_frames_end || now_ms > self.validity_deadline_ms {
            self.state = SchedulerState::Rendering;
            return Decision::Redraw;
        }

        self.state = SchedulerState::Idle;
        let deadline_ms = self.validity_deadline_ms;
        let timeout_ms = deadline_ms.is_finite().then(|| (deadline_ms - now_ms).max(0.0));
        Decision::Wait {
            deadline_ms,
            timeout_ms,
        }
    }

    /// The display pass was submitted: advance the frame id and clear the
    /// validity deadline for the next frame's reports.
    pub fn presented(&mut self) {
        self.frame_id = self.frame_id.wrapping_add(1);
        self.validity_deadline_ms = f64::INFINITY;
        self.presented_frames = self.presented_frames.wrapping_add(1);
        self.state = SchedulerState::Idle;
    }

    /// The display pass could not present (surface lost, timeout). The frame
    /// stays outstanding and is retried on the next iteration.
    pub fn skipped(&mut self) {
        self.force_redraw();
        self.skipped_frames = self.skipped_frames.wrapping_add(1);
        self.state = SchedulerState::Idle;
    }
}
