use core::fmt;

use lull_api::WidgetId;

use crate::geom::PxRect;
use crate::pass::Pass;

/// Latching toggle whose value lives in persistent state under `id`.
///
/// Flips when the left button is released inside `rect`. A slot remembers
/// the snapshot of its last flip, so processing the same inputs twice flips
/// once. The display phase reads the value without claiming a slot.
pub fn toggle(pass: &mut Pass<'_>, id: WidgetId, rect: PxRect, label: impl fmt::Display) -> bool {
    if pass.processes_inputs() {
        let inputs = pass.inputs();
        let mouse = &inputs.mouse;
        if mouse.left.released && rect.contains(mouse.position) {
            let flipped = match pass.state_mut().toggle(id) {
                Some(slot) => slot.flip_once(inputs.frame_id, inputs.frame_ms),
                None => {
                    log::warn!("toggle {id:?} ignored: no free slot");
                    false
                }
            };
            if flipped {
                pass.invalidate();
            }
        }
    }

    let on = pass.state().toggle_value(id);
    if pass.displays() {
        pass.draw_box(rect, on);
        pass.draw_label(rect, label);
    }
    on
}
