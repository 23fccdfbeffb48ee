//! The panel the module draws: help text, a row of no-op buttons, two
//! animation toggles driving blinking indicators, and an optional debug
//! readout.
//!
//! Edit this file and rebuild the crate while the host runs to watch the
//! module reload.

use lull_api::{AnimationTimer, Int2, Report, WidgetId};

use crate::layout::{Axis, LayoutScope};
use crate::pass::Pass;
use crate::widgets::{button, indicator, label, toggle};

/// Background, `0xRRGGBBAA`.
pub const CLEAR_RGBA: u32 = 0x9696_96ff;

const ORIGIN: Int2 = Int2::new(40, 40);
/// 96 px columns, 24 px rows.
const RHYTHM: Int2 = Int2::new(96, 24);
/// Height of a debug text cell, in pixels.
const DEBUG_CELL_PX: i32 = 14;

const ATTR_PLAIN: u8 = 0x0f;
const ATTR_LIT: u8 = 0x1f;

const BUTTON_COUNT: u32 = 8;

struct Blinker {
    period_ms: f64,
    /// First slot relative to the frame that created the timer.
    phase_ms: f64,
}

const BLINKERS: [Blinker; 2] = [
    Blinker { period_ms: 300.0, phase_ms: 0.0 },
    Blinker { period_ms: 600.0, phase_ms: -150.0 },
];

const DEBUG_TOGGLE: WidgetId = WidgetId::from_name("debug text");

fn blinker_timer(i: usize) -> WidgetId {
    WidgetId::indexed("plonk", i as u32)
}

fn blinker_switch(i: usize) -> WidgetId {
    WidgetId::indexed("plonk switch", i as u32)
}

/// Runs the whole panel for one update call.
///
/// `scratch_high_water` is the largest scratch request seen by earlier
/// calls; it only feeds the debug readout.
pub fn panel(pass: &mut Pass<'_>, scratch_high_water: usize) {
    let frame_id = pass.inputs().frame_id;
    // Only input passes count; a display call reads the tally.
    let updates_this_frame = if pass.processes_inputs() {
        pass.state_mut().count_update(frame_id)
    } else {
        pass.state().updates_in_frame(frame_id)
    };

    pass.clear(CLEAR_RGBA);

    let width = pass.display().size_px.x;
    let mut layout = LayoutScope::new(ORIGIN, Axis::Vertical, RHYTHM);

    label(pass, layout.next(width, 16), "Pressing Q will quit the application.");
    label(pass, layout.next(width, 16), "Pressing D will show debug info.");
    layout.step();

    layout.row(|row| {
        for i in 0..BUTTON_COUNT {
            button(pass, row.next(80, 80), i);
        }
        label(pass, row.next(200, 80), "buttons (no-op)");
    });

    let mut enabled = [false; BLINKERS.len()];
    layout.row(|row| {
        for (i, on) in enabled.iter_mut().enumerate() {
            *on = toggle(pass, blinker_switch(i), row.next(80, 80), i);
        }
        label(pass, row.next(200, 80), "toggle animation");
    });

    drive_blinkers(pass, enabled);

    layout.row(|row| {
        for i in 0..BLINKERS.len() {
            label(pass, row.next(80, 20), format_args!("plonk{}", i + 1));
        }
    });

    layout.row(|row| {
        for i in 0..BLINKERS.len() {
            let lit = pass.state().timer(blinker_timer(i)).is_some_and(|t| t.toggle);
            indicator(pass, row.next(80, 80), lit);
        }
        label(pass, row.next(200, 80), "animation state");
    });

    let debug_shown = toggle(pass, DEBUG_TOGGLE, layout.place(140, 40), "debug text");
    layout.advance(Int2::new(0, 40));
    layout.step();

    if debug_shown && pass.displays() {
        let first_row = layout.cursor().y / DEBUG_CELL_PX;
        debug_readout(pass, first_row, updates_this_frame, scratch_high_water);
    }
}

/// Ticks the blinkers under `PROCESS_INPUTS` and folds their firings and
/// next slots into the report.
fn drive_blinkers(pass: &mut Pass<'_>, enabled: [bool; BLINKERS.len()]) {
    if !pass.processes_inputs() {
        return;
    }
    let now = pass.inputs().frame_ms;
    let mut report = Report::default();
    for (i, (blinker, on)) in BLINKERS.iter().zip(enabled).enumerate() {
        let timer = pass.state_mut().timer_or_insert_with(blinker_timer(i), || {
            AnimationTimer::new(blinker.period_ms, now + blinker.phase_ms)
        });
        let Some(timer) = timer else {
            log::warn!("blinker {i} has no timer slot");
            continue;
        };
        timer.enabled = on;
        timer.drive(now, &mut report);
    }
    pass.merge_report(&report);
}

fn debug_readout(pass: &mut Pass<'_>, mut row: i32, updates: u32, scratch_high_water: usize) {
    let inputs = pass.inputs();
    let display = pass.display();

    pass.debug_text(
        0,
        row,
        ATTR_PLAIN,
        format_args!(
            "Frame: {:.6} (ms) {} (count) {} (updates w/o invalidation)",
            inputs.frame_ms, inputs.frame_id, updates
        ),
    );
    row += 1;
    pass.debug_text(
        0,
        row,
        ATTR_PLAIN,
        format_args!(
            "Display size: {} x {}{}",
            display.size_px.x,
            display.size_px.y,
            if display.resized { " resizing" } else { "" }
        ),
    );
    row += 1;
    let mouse = &inputs.mouse;
    pass.debug_text(
        0,
        row,
        ATTR_PLAIN,
        format_args!("Mouse at {} {}", mouse.position.x, mouse.position.y),
    );
    row += 1;
    pass.debug_text(
        0,
        row,
        ATTR_PLAIN,
        format_args!("Left button: {}", if mouse.left.down { "down" } else { "up" }),
    );
    row += 1;

    for i in 0..BLINKERS.len() {
        let Some(timer) = pass.state().timer(blinker_timer(i)).copied() else {
            continue;
        };
        let attr = if timer.toggle { ATTR_LIT } else { ATTR_PLAIN };
        pass.debug_text(
            4,
            row,
            attr,
            format_args!(
                "Plonk{} {:.6} (remaining ms) {:.6} (firing error ms)",
                i,
                timer.next_fire_ms - inputs.frame_ms,
                timer.error_ms
            ),
        );
        row += 1;
    }

    pass.debug_text(
        0,
        row,
        ATTR_PLAIN,
        format_args!("Scratch: {scratch_high_water} bytes (high water)"),
    );
}
