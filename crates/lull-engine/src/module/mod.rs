//! Hot-swappable UI module boundary.
//!
//! A `ModuleRecord` owns one dynamically loaded UI module: the library
//! handle, the resolved function table, and a change detector watching the
//! file on disk. Calls always go through `ModuleTable`, which degrades to a
//! no-op when nothing usable is loaded, so the host loop never has to care
//! whether a module is present.
//!
//! Reloads are gated on a `FrameFence`: code that produced the in-flight GPU
//! frame must not be unmapped while that frame is still being consumed.

mod detect;
mod error;
mod fence;
mod loader;
mod record;

pub use detect::{ChangeDetector, FileStamp};
pub use error::ModuleError;
pub use fence::FrameFence;
pub use loader::{dylib_file_name, modules_dir_near_exe};
pub use record::{ModuleRecord, ModuleState, ModuleTable, RefreshOutcome};
