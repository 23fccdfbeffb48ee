use std::time::{Duration, Instant};

/// Timing snapshot taken once per loop iteration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the clock origin.
    pub now_ms: f64,
}

/// Monotonic millisecond clock anchored at host start.
///
/// `f64` milliseconds keep sub-microsecond resolution for centuries of
/// uptime, so no wrap handling is attempted.
#[derive(Debug, Clone)]
pub struct HostClock {
    origin: Instant,
    last_ms: f64,
}

impl HostClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self { origin, last_ms: 0.0 }
    }

    #[inline]
    pub fn origin(&self) -> Instant {
        self.origin
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.ms_at(Instant::now())
    }

    #[inline]
    pub fn ms_at(&self, t: Instant) -> f64 {
        t.saturating_duration_since(self.origin).as_secs_f64() * 1000.0
    }

    /// Inverse of [`ms_at`](Self::ms_at). `None` for non-finite deadlines.
    pub fn instant_at(&self, ms: f64) -> Option<Instant> {
        if !ms.is_finite() {
            return None;
        }
        let d = Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).ok()?;
        self.origin.checked_add(d)
    }

    /// Samples the clock for a new iteration. Never goes backwards.
    pub fn tick(&mut self) -> FrameTime {
        let now_ms = self.now_ms().max(self.last_ms);
        self.last_ms = now_ms;
        FrameTime { now_ms }
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
