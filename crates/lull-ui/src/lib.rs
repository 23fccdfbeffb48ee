//! lull UI module.
//!
//! Built as a `cdylib` and loaded by the host at runtime; rebuilding the
//! crate while the host runs swaps the new code in on the next iteration.
//! All widget state lives in the host-owned [`PersistentState`], so a reload
//! keeps toggles and timers where they were.
//!
//! Exported symbols:
//! - `ui_api_version() -> u32`
//! - `ui_get_vtable_0() -> VtableV0`

pub mod arena;
pub mod canvas;
pub mod demo;
pub mod geom;
pub mod layout;
mod logger;
pub mod pass;
pub mod widgets;

use std::sync::atomic::{AtomicUsize, Ordering};

use lull_api::{Fault, Ui, UpdateFlags, VtableV0, CURRENT_VERSION};

use crate::arena::ScratchArena;
use crate::canvas::{Canvas, NullCanvas};
use crate::logger::HostScope;
use crate::pass::Pass;

/// Largest scratch request seen by any update call of this image.
static SCRATCH_HIGH_WATER: AtomicUsize = AtomicUsize::new(0);

#[unsafe(no_mangle)]
pub extern "C" fn ui_api_version() -> u32 {
    CURRENT_VERSION
}

#[unsafe(no_mangle)]
pub extern "C" fn ui_get_vtable_0() -> VtableV0 {
    VtableV0 {
        version: VtableV0::VERSION,
        update: Some(update),
    }
}

extern "C" fn update(ui: *mut Ui, flags: u32) {
    // SAFETY: the host passes a live `Ui` exclusively for this call.
    let Some(ui) = (unsafe { ui.as_mut() }) else {
        return;
    };
    run(ui, UpdateFlags::from_raw(flags));
}

/// One update call: runs the panel under `flags` and writes the report and
/// any fault back into `ui`.
pub fn run(ui: &mut Ui, flags: UpdateFlags) {
    let _logging = HostScope::enter(ui.host);
    let mut scratch = ScratchArena::default();

    let result = {
        // SAFETY: the host lends `host` and `state` for the duration of the
        // call and touches neither until it returns.
        let view = unsafe { ui.view() };
        let canvas: &dyn Canvas = match view.host {
            Some(host) => host,
            None => &NullCanvas,
        };
        let Some(state) = view.state else {
            log::warn!("update called without persistent state; skipped");
            return;
        };
        if !state.is_compatible() {
            log::info!(
                "persistent state layout {} is not {}; resetting",
                state.layout_version,
                lull_api::STATE_LAYOUT_VERSION
            );
            state.reset();
        }

        let mut pass = Pass::new(
            flags,
            view.inputs,
            view.display,
            view.report,
            state,
            canvas,
            &mut scratch,
        );
        demo::panel(&mut pass, SCRATCH_HIGH_WATER.load(Ordering::Relaxed));
        pass.finish()
    };

    SCRATCH_HIGH_WATER.fetch_max(scratch.max_requested(), Ordering::Relaxed);

    if let Err(e) = result {
        log::error!("{e}");
        ui.raise(Fault::SCRATCH_EXHAUSTED);
    }
}
