use core::fmt;

use lull_api::{Display, Inputs, Mouse, PersistentState, Report, UpdateFlags};

use crate::arena::{ArenaExhausted, ScratchArena};
use crate::canvas::Canvas;
use crate::geom::PxRect;

/// One update call as seen by widget procedures.
///
/// Widgets run under either phase or both:
/// - `PROCESS_INPUTS`: read the snapshot, mutate persistent state, write
///   the report. Running it twice for the same snapshot changes nothing.
/// - `DISPLAY`: emit draw submissions. Persistent widget state is only read.
///
/// Draw methods are no-ops outside a display pass and after the scratch
/// arena has run out; the first exhaustion is kept and returned by
/// [`finish`](Self::finish).
pub struct Pass<'a> {
    flags: UpdateFlags,
    inputs: &'a Inputs,
    display: &'a Display,
    report: &'a mut Report,
    state: &'a mut PersistentState,
    canvas: &'a dyn Canvas,
    scratch: &'a mut ScratchArena,
    exhausted: Option<ArenaExhausted>,
}

impl<'a> Pass<'a> {
    pub fn new(
        flags: UpdateFlags,
        inputs: &'a Inputs,
        display: &'a Display,
        report: &'a mut Report,
        state: &'a mut PersistentState,
        canvas: &'a dyn Canvas,
        scratch: &'a mut ScratchArena,
    ) -> Self {
        scratch.reset();
        Self {
            flags,
            inputs,
            display,
            report,
            state,
            canvas,
            scratch,
            exhausted: None,
        }
    }

    // ── phase ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn flags(&self) -> UpdateFlags {
        self.flags
    }

    #[inline]
    pub fn processes_inputs(&self) -> bool {
        self.flags.processes_inputs()
    }

    #[inline]
    pub fn displays(&self) -> bool {
        self.flags.displays()
    }

    #[inline]
    fn emitting(&self) -> bool {
        self.displays() && self.exhausted.is_none()
    }

    // ── inputs ────────────────────────────────────────────────────────────

    #[inline]
    pub fn inputs(&self) -> &'a Inputs {
        self.inputs
    }

    #[inline]
    pub fn mouse(&self) -> &'a Mouse {
        &self.inputs.mouse
    }

    #[inline]
    pub fn display(&self) -> &'a Display {
        self.display
    }

    // ── invalidation ──────────────────────────────────────────────────────

    #[inline]
    pub fn invalidate(&mut self) {
        self.report.mark_dirty();
    }

    #[inline]
    pub fn request_frames(&mut self, n: i32) {
        self.report.request_frames(n);
    }

    #[inline]
    pub fn tighten_validity(&mut self, ttl_ms: f64) {
        self.report.tighten_validity(ttl_ms);
    }

    #[inline]
    pub fn merge_report(&mut self, other: &Report) {
        self.report.merge(other);
    }

    #[inline]
    pub fn report(&self) -> &Report {
        &*self.report
    }

    // ── persistent state ──────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &PersistentState {
        &*self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut PersistentState {
        &mut *self.state
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn clear(&mut self, rgba: u32) {
        if self.emitting() {
            self.canvas.clear(rgba);
        }
    }

    pub fn draw_box(&mut self, rect: PxRect, alt: bool) {
        if self.emitting() {
            self.canvas.draw_box(rect, alt);
        }
    }

    /// Formats `text` into the scratch arena and submits it centered in
    /// `rect`.
    pub fn draw_label(&mut self, rect: PxRect, text: impl fmt::Display) {
        if !self.emitting() {
            return;
        }
        let canvas = self.canvas;
        match self.scratch.format(text) {
            Ok(s) => canvas.draw_label(rect, s),
            Err(e) => self.exhausted = Some(e),
        }
    }

    pub fn debug_text(&mut self, col: i32, row: i32, attr: u8, text: impl fmt::Display) {
        if !self.emitting() {
            return;
        }
        let canvas = self.canvas;
        match self.scratch.format(text) {
            Ok(s) => canvas.debug_text(col, row, attr, s),
            Err(e) => self.exhausted = Some(e),
        }
    }

    #[inline]
    pub fn exhausted(&self) -> Option<ArenaExhausted> {
        self.exhausted
    }

    pub fn finish(self) -> Result<(), ArenaExhausted> {
        match self.exhausted {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::harness::Harness;
    use super::*;
    use crate::canvas::recording::Drawn;

    const R: PxRect = PxRect::new(0, 0, 10, 10);

    #[test]
    fn draws_are_dropped_outside_display() {
        let mut h = Harness::new();
        h.run(UpdateFlags::PROCESS_INPUTS, |p| {
            p.clear(0xff);
            p.draw_box(R, false);
            p.draw_label(R, "x");
            p.debug_text(0, 0, 0x0f, "x");
        });
        assert!(h.canvas.is_empty());
    }

    #[test]
    fn display_pass_forwards_formatted_text() {
        let mut h = Harness::new();
        h.run(UpdateFlags::DISPLAY, |p| {
            p.draw_label(R, format_args!("plonk{}", 2));
            p.debug_text(4, 9, 0x1f, 1.5);
        });
        assert_eq!(
            h.canvas.take(),
            vec![
                Drawn::Label(R, "plonk2".into()),
                Drawn::Debug { col: 4, row: 9, attr: 0x1f, text: "1.5".into() },
            ]
        );
    }

    #[test]
    fn exhaustion_stops_emitting_for_the_rest_of_the_call() {
        let mut h = Harness::new();
        h.scratch = ScratchArena::with_limit(4);
        let exhausted = h.run(UpdateFlags::DISPLAY, |p| {
            p.draw_label(R, "ok");
            p.draw_label(R, "too long");
            p.draw_box(R, true);
            p.draw_label(R, "k");
            p.exhausted()
        });
        assert_eq!(exhausted.map(|e| e.limit), Some(4));
        assert_eq!(h.canvas.take(), vec![Drawn::Label(R, "ok".into())]);

        // The next call starts with an empty arena.
        h.run(UpdateFlags::DISPLAY, |p| p.draw_label(R, "ok"));
        assert_eq!(h.canvas.take(), vec![Drawn::Label(R, "ok".into())]);
    }

    #[test]
    fn finish_returns_first_exhaustion() {
        let inputs = Inputs::default();
        let display = Display::default();
        let mut report = Report::default();
        let mut state = PersistentState::new();
        let canvas = crate::canvas::NullCanvas;
        let mut scratch = ScratchArena::with_limit(2);
        let mut pass = Pass::new(
            UpdateFlags::DISPLAY,
            &inputs,
            &display,
            &mut report,
            &mut state,
            &canvas,
            &mut scratch,
        );
        pass.draw_label(R, "abc");
        pass.draw_label(R, "defgh");
        let err = pass.finish().unwrap_err();
        assert_eq!(err.requested, 3);
    }

    #[test]
    fn report_writes_are_monotone() {
        let mut h = Harness::new();
        h.run(UpdateFlags::PROCESS_INPUTS, |p| {
            p.tighten_validity(300.0);
            p.invalidate();
            p.tighten_validity(900.0);
            p.request_frames(0);
        });
        assert_eq!(h.report.outdated_frames_n, 1);
        assert_eq!(h.report.validity_ms, 300.0);
    }
}
