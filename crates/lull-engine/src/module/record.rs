use std::fs;
use std::path::{Path, PathBuf};

use libloading::Library;
use lull_api::{Ui, UpdateFlags, VtableV0};

use super::detect::{ChangeDetector, FileStamp};
use super::fence::FrameFence;
use super::loader;

/// Lifecycle of a module record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ModuleState {
    /// No usable library; calls are no-ops.
    Unloaded,
    Loaded,
    /// The file on disk changed; reload at the next fenced refresh.
    Stale,
}

/// Resolved entry points of the loaded module.
#[derive(Debug, Copy, Clone, Default)]
pub enum ModuleTable {
    /// Fallback used whenever nothing valid is loaded. Leaves the report
    /// untouched, so the scheduler keeps waiting.
    #[default]
    Noop,
    V0(VtableV0),
}

impl ModuleTable {
    pub fn version(&self) -> Option<u32> {
        match self {
            ModuleTable::Noop => None,
            ModuleTable::V0(t) => Some(t.version),
        }
    }

    pub fn update(&self, ui: &mut Ui, flags: UpdateFlags) {
        match self {
            ModuleTable::Noop => {}
            ModuleTable::V0(t) => {
                if let Some(update) = t.update {
                    update(ui as *mut Ui, flags.bits());
                }
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RefreshOutcome {
    Unchanged,
    Reloaded,
    /// A reload was attempted and failed; the no-op table is active.
    Failed,
}

/// One hot-swappable module.
///
/// The table's function pointers point into `library`; they are always
/// reset to [`ModuleTable::Noop`] before the library is dropped.
pub struct ModuleRecord<D: ChangeDetector = FileStamp> {
    source: PathBuf,
    shadow: Option<PathBuf>,
    library: Option<Library>,
    table: ModuleTable,
    detector: D,
    state: ModuleState,
    generation: u64,
    last_error: Option<String>,
}

impl ModuleRecord<FileStamp> {
    /// Loads `source` immediately and watches it for changes.
    pub fn open(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let detector = FileStamp::new(&source);
        Self::with_detector(source, detector)
    }
}

impl<D: ChangeDetector> ModuleRecord<D> {
    pub fn with_detector(source: impl Into<PathBuf>, detector: D) -> Self {
        let mut record = Self {
            source: source.into(),
            shadow: None,
            library: None,
            table: ModuleTable::Noop,
            detector,
            state: ModuleState::Unloaded,
            generation: 0,
            last_error: None,
        };
        record.load();
        record
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Number of successful loads so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn table(&self) -> ModuleTable {
        self.table
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.library.is_some()
    }

    pub fn update(&self, ui: &mut Ui, flags: UpdateFlags) {
        self.table.update(ui, flags);
    }

    /// Polls for changes and reloads behind `fence` when needed.
    ///
    /// Call at the top of an iteration, before any module call for it.
    pub fn refresh(&mut self, fence: &mut dyn FrameFence) -> RefreshOutcome {
        if self.detector.poll() {
            log::debug!("module {} changed on disk", self.source.display());
            self.state = ModuleState::Stale;
        }
        if self.state != ModuleState::Stale {
            return RefreshOutcome::Unchanged;
        }

        fence.wait_idle();
        if self.load() {
            RefreshOutcome::Reloaded
        } else {
            RefreshOutcome::Failed
        }
    }

    /// Drops the current library and tries to bring up a fresh copy.
    /// Returns whether a valid table is now active.
    fn load(&mut self) -> bool {
        self.unload();

        let shadow = loader::shadow_path(&self.source, self.generation + 1);
        match loader::open(&self.source, &shadow) {
            Ok((library, table)) => {
                self.generation += 1;
                self.library = Some(library);
                self.table = table;
                self.shadow = Some(shadow);
                self.state = ModuleState::Loaded;
                self.last_error = None;
                log::info!(
                    "loaded module {} (generation {}, abi v{})",
                    self.source.display(),
                    self.generation,
                    table.version().unwrap_or_default()
                );
                true
            }
            Err(e) => {
                log::warn!("module unavailable, running without UI: {e}");
                remove_shadow(&shadow);
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    fn unload(&mut self) {
        self.table = ModuleTable::Noop;
        if let Some(library) = self.library.take() {
            if let Err(e) = library.close() {
                log::warn!("closing module {}: {e}", self.source.display());
            }
        }
        if let Some(shadow) = self.shadow.take() {
            remove_shadow(&shadow);
        }
        self.state = ModuleState::Unloaded;
    }
}

impl<D: ChangeDetector> Drop for ModuleRecord<D> {
    fn drop(&mut self) {
        self.unload();
    }
}

fn remove_shadow(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::debug!("leaving stale module copy {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lull_api::{Display, Inputs, Int2, Mouse, Report};
    use std::ptr;

    #[derive(Default)]
    struct CountingFence {
        waits: u32,
    }

    impl FrameFence for CountingFence {
        fn wait_idle(&mut self) {
            self.waits += 1;
        }
    }

    /// Reports a change on every poll while `pending` is set.
    struct ScriptedDetector {
        pending: bool,
    }

    impl ChangeDetector for ScriptedDetector {
        fn poll(&mut self) -> bool {
            std::mem::take(&mut self.pending)
        }
    }

    fn blank_ui() -> Ui {
        Ui::new(
            Inputs::new(0.0, 0, Mouse::default()),
            Display {
                resized: false,
                size_px: Int2::new(640, 480),
            },
            ptr::null(),
            ptr::null_mut(),
        )
    }

    extern "C" fn mark_dirty(ui: *mut Ui, _flags: u32) {
        if let Some(ui) = unsafe { ui.as_mut() } {
            ui.report.mark_dirty();
        }
    }

    // ── fallback ──────────────────────────────────────────────────────────

    #[test]
    fn missing_module_falls_back_to_noop() {
        let dir = tempfile::tempdir().unwrap();
        let record = ModuleRecord::open(dir.path().join(loader::dylib_file_name("absent")));
        assert_eq!(record.state(), ModuleState::Unloaded);
        assert!(matches!(record.table(), ModuleTable::Noop));
        assert!(record.last_error().is_some());
        assert_eq!(record.generation(), 0);
    }

    #[test]
    fn noop_update_leaves_report_clean() {
        let mut ui = blank_ui();
        ModuleTable::Noop.update(&mut ui, UpdateFlags::all());
        assert_eq!(ui.report, Report::default());
    }

    #[test]
    fn v0_table_dispatches_update() {
        let table = ModuleTable::V0(VtableV0 {
            version: VtableV0::VERSION,
            update: Some(mark_dirty),
        });
        let mut ui = blank_ui();
        table.update(&mut ui, UpdateFlags::PROCESS_INPUTS);
        assert!(ui.report.is_dirty());
        assert_eq!(table.version(), Some(0));
    }

    #[test]
    fn v0_table_without_update_is_inert() {
        let table = ModuleTable::V0(VtableV0 {
            version: VtableV0::VERSION,
            update: None,
        });
        let mut ui = blank_ui();
        table.update(&mut ui, UpdateFlags::all());
        assert!(ui.report.is_idle());
    }

    // ── refresh ───────────────────────────────────────────────────────────

    #[test]
    fn refresh_without_change_skips_fence() {
        let dir = tempfile::tempdir().unwrap();
        let mut record =
            ModuleRecord::with_detector(dir.path().join("m.so"), ScriptedDetector { pending: false });
        let mut fence = CountingFence::default();
        assert_eq!(record.refresh(&mut fence), RefreshOutcome::Unchanged);
        assert_eq!(fence.waits, 0);
    }

    #[test]
    fn change_waits_on_fence_before_reloading() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join(loader::dylib_file_name("broken"));
        fs::write(&src, b"not a library").unwrap();
        let mut record = ModuleRecord::with_detector(&src, ScriptedDetector { pending: true });
        let mut fence = CountingFence::default();

        assert_eq!(record.refresh(&mut fence), RefreshOutcome::Failed);
        assert_eq!(fence.waits, 1);
        assert_eq!(record.state(), ModuleState::Unloaded);
        assert!(matches!(record.table(), ModuleTable::Noop));

        // Failure is not retried until the file changes again.
        assert_eq!(record.refresh(&mut fence), RefreshOutcome::Unchanged);
        assert_eq!(fence.waits, 1);
    }
}
