use anyhow::{bail, Result};
use lull_api::{Display, Inputs, PersistentState, Report, Ui, UpdateFlags};
use lull_engine::module::ModuleTable;
use lull_engine::scene::DrawList;

use crate::bridge::Bridge;

/// Host-side half of the module contract: the persistent widget state and
/// the callback bridge, shared by every module image that gets loaded.
pub struct UiSession {
    state: Box<PersistentState>,
    bridge: Bridge,
}

impl UiSession {
    pub fn new() -> Self {
        Self {
            state: Box::new(PersistentState::new()),
            bridge: Bridge::new(),
        }
    }

    pub fn state(&self) -> &PersistentState {
        &self.state
    }

    /// `PROCESS_INPUTS` call. Returns the module's report.
    pub fn process(&mut self, table: ModuleTable, inputs: Inputs, display: Display) -> Result<Report> {
        self.call(table, inputs, display, UpdateFlags::PROCESS_INPUTS)
    }

    /// `DISPLAY` call. The module's draw calls end up in the returned list,
    /// which stays valid until the next display call.
    pub fn display(
        &mut self,
        table: ModuleTable,
        inputs: Inputs,
        display: Display,
    ) -> Result<&mut DrawList> {
        self.call(table, inputs, display, UpdateFlags::DISPLAY)?;
        Ok(self.bridge.list_mut())
    }

    fn call(
        &mut self,
        table: ModuleTable,
        inputs: Inputs,
        display: Display,
        flags: UpdateFlags,
    ) -> Result<Report> {
        let api = self.bridge.api(flags.displays());
        let mut ui = Ui::new(inputs, display, &api, &mut *self.state);
        table.update(&mut ui, flags);
        self.bridge.disarm();

        if ui.fault.is_fault() {
            log::error!("module fault {:?}: {}", ui.fault, ui.fault.describe());
            bail!(
                "UI module raised fault {} ({}) during {:?}",
                ui.fault.0,
                ui.fault.describe(),
                flags
            );
        }
        Ok(ui.report)
    }
}

impl Default for UiSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lull_api::{Fault, Int2, VtableV0};
    use lull_engine::module::{dylib_file_name, ModuleRecord, ModuleState};
    use lull_engine::scene::DrawCmd;

    use super::*;

    fn module() -> ModuleTable {
        ModuleTable::V0(lull_ui::ui_get_vtable_0())
    }

    /// The `lull_ui` shared library cargo built alongside this test binary.
    fn built_module() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let deps = exe.parent()?;
        let name = dylib_file_name("lull_ui");
        [Some(deps), deps.parent()]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(&name))
            .find(|p| p.is_file())
    }

    fn labels(list: &DrawList) -> Vec<&str> {
        list.iter()
            .filter_map(|c| match c {
                DrawCmd::Label(l) => Some(l.text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn display() -> Display {
        Display { resized: false, size_px: Int2::new(1024, 640) }
    }

    fn inputs(frame_id: u64, frame_ms: f64) -> Inputs {
        Inputs::new(frame_ms, frame_id, Default::default())
    }

    // ── module in process ─────────────────────────────────────────────────

    #[test]
    fn idle_module_reports_nothing() {
        let mut session = UiSession::new();
        let report = session.process(module(), inputs(0, 0.0), display()).unwrap();
        assert!(report.is_idle());
    }

    #[test]
    fn display_fills_the_draw_list() {
        let mut session = UiSession::new();
        let list = session.display(module(), inputs(0, 0.0), display()).unwrap();
        assert!(list.clear_color().is_some());
        let labels = labels(list);
        assert_eq!(labels[0], "Pressing Q will quit the application.");
        assert!(labels.contains(&"toggle animation"));
    }

    #[test]
    fn process_call_never_draws() {
        let mut session = UiSession::new();
        session.display(module(), inputs(0, 0.0), display()).unwrap();
        let before = session.bridge.list().len();
        session.process(module(), inputs(1, 16.0), display()).unwrap();
        assert_eq!(session.bridge.list().len(), before);
    }

    #[test]
    fn toggle_state_survives_across_calls() {
        let mut session = UiSession::new();
        let mut click = inputs(1, 10.0);
        // First animation toggle.
        click.mouse.position = Int2::new(60, 230);
        click.mouse.left.released = true;
        let report = session.process(module(), click, display()).unwrap();
        assert!(report.is_dirty());
        // The blinker fired and now bounds the validity.
        assert!(report.validity_ms.is_finite());

        let later = session.process(module(), inputs(2, 100.0), display()).unwrap();
        assert!(!later.is_dirty());
        assert!(later.validity_ms.is_finite());
    }

    // ── fallback and faults ───────────────────────────────────────────────

    #[test]
    fn noop_table_is_silent() {
        let mut session = UiSession::new();
        let report = session.process(ModuleTable::Noop, inputs(0, 0.0), display()).unwrap();
        assert!(report.is_idle());
        let list = session.display(ModuleTable::Noop, inputs(0, 0.0), display()).unwrap();
        assert!(list.is_empty());
    }

    extern "C" fn faulting_update(ui: *mut Ui, _flags: u32) {
        // SAFETY: the session passes a live `Ui`.
        if let Some(ui) = unsafe { ui.as_mut() } {
            ui.raise(Fault::SCRATCH_EXHAUSTED);
        }
    }

    #[test]
    fn module_fault_is_an_error() {
        let mut session = UiSession::new();
        let table = ModuleTable::V0(VtableV0 {
            version: VtableV0::VERSION,
            update: Some(faulting_update),
        });
        let err = session.display(table, inputs(0, 0.0), display()).unwrap_err();
        assert!(err.to_string().contains("scratch arena exhausted"));
    }

    // ── built library ─────────────────────────────────────────────────────

    #[test]
    fn built_module_loads_through_the_record() {
        let Some(built) = built_module() else {
            eprintln!("lull_ui shared library not found next to the test binary; skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join(dylib_file_name("lull_ui"));
        std::fs::copy(&built, &source).unwrap();

        let record = ModuleRecord::open(&source);
        assert_eq!(record.state(), ModuleState::Loaded, "{:?}", record.last_error());
        assert_eq!(record.generation(), 1);
        assert_eq!(record.table().version(), Some(VtableV0::VERSION));

        let mut session = UiSession::new();
        let list = session.display(record.table(), inputs(0, 0.0), display()).unwrap();
        assert_eq!(labels(list)[0], "Pressing Q will quit the application.");
    }
}
