//! Host ↔ UI module ABI.
//!
//! Everything that crosses the dynamic-library boundary lives here and is
//! `#[repr(C)]`. The host fills a [`Ui`] per update call; the module reads the
//! input snapshot, draws through the [`HostApi`] callbacks, and writes its
//! staleness into [`Report`].
//!
//! Versioning: each ABI revision gets its own `VtableV*` struct and exported
//! getter symbol. Hosts look up [`API_VERSION_SYMBOL`] first and refuse
//! modules whose version is not in [`KNOWN_VERSIONS`].

mod abi;
mod flags;
mod host;
mod persist;
mod report;
mod timer;

pub use abi::{DigitalButton, Display, Fault, Inputs, Int2, Mouse, Ui, UiView, TEXT_CAPACITY};
pub use flags::UpdateFlags;
pub use host::{str_from_raw, HostApi, LogLevel};
pub use persist::{
    PersistentState, TimerSlot, ToggleSlot, WidgetId, MAX_TIMERS, MAX_TOGGLES, STATE_LAYOUT_VERSION,
};
pub use report::Report;
pub use timer::AnimationTimer;

/// Module update entry point: `update(ui, flags)`.
pub type UpdateFn = extern "C" fn(ui: *mut Ui, flags: u32);

/// Function table for ABI version 0.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct VtableV0 {
    /// Must equal [`VtableV0::VERSION`]; guards against a getter returning a
    /// table of a different revision.
    pub version: u32,
    pub update: Option<UpdateFn>,
}

impl VtableV0 {
    pub const VERSION: u32 = 0;
}

/// `extern "C" fn() -> VtableV0`, exported by modules as [`VTABLE_V0_SYMBOL`].
pub type GetVtableV0Fn = unsafe extern "C" fn() -> VtableV0;

/// `extern "C" fn() -> u32`, optional, exported as [`API_VERSION_SYMBOL`].
pub type ApiVersionFn = unsafe extern "C" fn() -> u32;

pub const VTABLE_V0_SYMBOL: &[u8] = b"ui_get_vtable_0\0";
pub const API_VERSION_SYMBOL: &[u8] = b"ui_api_version\0";

/// ABI versions this build of the host can dispatch.
pub const KNOWN_VERSIONS: &[u32] = &[VtableV0::VERSION];

/// Latest ABI version; what modules built against this crate report.
pub const CURRENT_VERSION: u32 = VtableV0::VERSION;
