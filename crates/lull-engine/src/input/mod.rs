//! Input subsystem.
//!
//! `InputState` holds what is currently down, `InputFrame` what changed since
//! the last iteration. `SnapshotBuilder` folds both into the `lull_api::Inputs`
//! value handed to the UI module. Platform translation lives in `platform`.

mod frame;
pub(crate) mod platform;
mod snapshot;
mod state;
mod types;

pub use frame::InputFrame;
pub use snapshot::SnapshotBuilder;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent, TextEvent, WheelDelta,
};
