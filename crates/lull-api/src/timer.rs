use crate::report::Report;

/// Periodic toggle driven by frame time.
///
/// Fires at most once per [`tick`](Self::tick). When several periods were
/// missed, the schedule skips ahead in whole periods so the phase stays
/// anchored to the first slot; `error_ms` records how late the firing was
/// relative to the most recent slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationTimer {
    pub period_ms: f64,
    pub enabled: bool,
    /// Flips on every firing.
    pub toggle: bool,
    pub next_fire_ms: f64,
    pub error_ms: f64,
}

impl AnimationTimer {
    /// Disabled timer whose first slot is `first_fire_ms`.
    pub const fn new(period_ms: f64, first_fire_ms: f64) -> Self {
        Self {
            period_ms,
            enabled: false,
            toggle: false,
            next_fire_ms: first_fire_ms,
            error_ms: 0.0,
        }
    }

    pub const fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Non-positive or non-finite periods never fire.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.enabled && self.period_ms > 0.0 && self.period_ms.is_finite()
    }

    /// Advances the timer to `now_ms`. Returns whether it fired.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.is_running() || !(now_ms >= self.next_fire_ms) {
            return false;
        }

        let period = self.period_ms;
        let missed = ((now_ms - self.next_fire_ms) / period).floor();
        let mut last_slot = self.next_fire_ms + missed * period;
        // Rounding can land one slot off on either side.
        while last_slot > now_ms {
            last_slot -= period;
        }
        while last_slot + period <= now_ms {
            last_slot += period;
        }

        self.next_fire_ms = last_slot + period;
        self.error_ms = now_ms - last_slot;
        self.toggle = !self.toggle;
        true
    }

    /// Milliseconds until the next slot, or `None` when not running.
    #[inline]
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.is_running().then(|| self.next_fire_ms - now_ms)
    }

    /// Ticks and writes the result into `report`: a firing marks the output
    /// dirty, and a running timer bounds the validity by its next slot.
    pub fn drive(&mut self, now_ms: f64, report: &mut Report) -> bool {
        let fired = self.tick(now_ms);
        if fired {
            report.mark_dirty();
        }
        if let Some(ttl) = self.remaining_ms(now_ms) {
            report.tighten_validity(ttl);
        }
        fired
    }
}

impl Default for AnimationTimer {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(period: f64, first: f64) -> AnimationTimer {
        AnimationTimer::new(period, first).enabled()
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn fires_on_time() {
        let mut t = timer(100.0, 0.0);
        assert!(t.tick(0.0));
        assert_eq!(t.next_fire_ms, 100.0);
        assert_eq!(t.error_ms, 0.0);
        assert!(t.toggle);
    }

    #[test]
    fn does_not_fire_early() {
        let mut t = timer(100.0, 0.0);
        t.tick(0.0);
        assert!(!t.tick(99.9));
        assert_eq!(t.next_fire_ms, 100.0);
        assert!(t.toggle);
    }

    #[test]
    fn catch_up_fires_once_and_keeps_phase() {
        let mut t = timer(100.0, 0.0);
        t.tick(0.0);
        assert!(t.tick(350.0));
        assert_eq!(t.next_fire_ms, 400.0);
        assert_eq!(t.error_ms, 50.0);
        // One firing, one flip.
        assert!(!t.toggle);
    }

    #[test]
    fn firing_exactly_on_a_later_slot_has_no_error() {
        let mut t = timer(100.0, 0.0);
        t.tick(0.0);
        assert!(t.tick(300.0));
        assert_eq!(t.next_fire_ms, 400.0);
        assert_eq!(t.error_ms, 0.0);
    }

    #[test]
    fn negative_phase_offset_is_honoured() {
        let mut t = timer(600.0, -150.0);
        assert!(t.tick(0.0));
        assert_eq!(t.next_fire_ms, 450.0);
        assert_eq!(t.error_ms, 150.0);
    }

    // ── disabled ──────────────────────────────────────────────────────────

    #[test]
    fn disabled_timer_never_fires() {
        let mut t = AnimationTimer::new(100.0, 0.0);
        assert!(!t.tick(1_000.0));
        assert_eq!(t.next_fire_ms, 0.0);
    }

    #[test]
    fn zero_period_never_fires() {
        let mut t = timer(0.0, 0.0);
        assert!(!t.tick(10.0));
        assert_eq!(t.remaining_ms(10.0), None);
    }

    // ── drive ─────────────────────────────────────────────────────────────

    #[test]
    fn drive_marks_dirty_and_bounds_validity() {
        let mut t = timer(300.0, 0.0);
        let mut r = Report::default();
        assert!(t.drive(10.0, &mut r));
        assert!(r.is_dirty());
        assert_eq!(r.validity_ms, 290.0);
    }

    #[test]
    fn drive_between_slots_only_bounds_validity() {
        let mut t = timer(300.0, 0.0);
        t.tick(0.0);
        let mut r = Report::default();
        assert!(!t.drive(100.0, &mut r));
        assert!(!r.is_dirty());
        assert_eq!(r.validity_ms, 200.0);
    }

    #[test]
    fn disabled_timer_contributes_nothing() {
        let mut t = AnimationTimer::new(300.0, 0.0);
        let mut r = Report::default();
        t.drive(1_000.0, &mut r);
        assert!(r.is_idle());
    }
}
