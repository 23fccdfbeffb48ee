use core::fmt;

use crate::geom::PxRect;
use crate::pass::Pass;

/// Momentary push button.
///
/// Returns whether the left button is held with the pointer inside `rect`.
/// Under `PROCESS_INPUTS` any left-button edge invalidates the output, as
/// does dragging a held button across the border, since both can change the
/// highlight.
pub fn button(pass: &mut Pass<'_>, rect: PxRect, label: impl fmt::Display) -> bool {
    let mouse = pass.mouse();
    let inside = rect.contains(mouse.position);
    let is_down = mouse.left.down && inside;

    if pass.processes_inputs() {
        let was_inside = rect.contains(mouse.position - mouse.delta_position);
        if mouse.left.transitioned() || (mouse.left.down && inside != was_inside) {
            pass.invalidate();
        }
    }

    if pass.displays() {
        pass.draw_box(rect, is_down);
        pass.draw_label(rect, label);
    }
    is_down
}

#[cfg(test)]
mod tests {
    use lull_api::UpdateFlags;

    use super::*;
    use crate::canvas::recording::Drawn;
    use crate::pass::harness::Harness;

    const RECT: PxRect = PxRect::new(40, 112, 80, 80);

    #[test]
    fn press_inside_holds_and_invalidates() {
        let mut h = Harness::new();
        h.move_to(60, 130);
        h.press();
        assert!(h.run(UpdateFlags::PROCESS_INPUTS, |p| button(p, RECT, 0)));
        assert!(h.report.is_dirty());
    }

    #[test]
    fn holding_still_does_not_invalidate() {
        let mut h = Harness::new();
        h.move_to(60, 130);
        h.press();
        h.next_frame(1, 16.0);
        assert!(h.run(UpdateFlags::PROCESS_INPUTS, |p| button(p, RECT, 0)));
        assert!(!h.report.is_dirty());
    }

    #[test]
    fn any_edge_invalidates_even_outside() {
        let mut h = Harness::new();
        h.move_to(500, 500);
        h.press();
        assert!(!h.run(UpdateFlags::PROCESS_INPUTS, |p| button(p, RECT, 0)));
        assert!(h.report.is_dirty());
    }

    #[test]
    fn dragging_out_while_held_invalidates() {
        let mut h = Harness::new();
        h.move_to(60, 130);
        h.press();
        h.next_frame(1, 16.0);
        h.move_to(300, 130);
        assert!(!h.run(UpdateFlags::PROCESS_INPUTS, |p| button(p, RECT, 0)));
        assert!(h.report.is_dirty());
    }

    #[test]
    fn hover_without_button_is_clean() {
        let mut h = Harness::new();
        h.move_to(60, 130);
        h.next_frame(1, 16.0);
        h.move_to(300, 130);
        h.run(UpdateFlags::PROCESS_INPUTS, |p| button(p, RECT, 0));
        assert!(!h.report.is_dirty());
    }

    #[test]
    fn display_draws_highlighted_box_and_label() {
        let mut h = Harness::new();
        h.move_to(120, 192);
        h.press();
        h.run(UpdateFlags::DISPLAY, |p| button(p, RECT, 7));
        assert!(h.report.is_idle());
        assert_eq!(
            h.canvas.take(),
            vec![Drawn::Box(RECT, true), Drawn::Label(RECT, "7".into())]
        );
    }
}
