//! Draw stream recorded during a display pass.
//!
//! Modules draw through host callbacks; each callback appends one command
//! here. Commands are painted strictly in the order they were recorded.

mod cmd;
mod list;

pub use cmd::{DebugTextCmd, DrawCmd, LabelCmd};
pub use list::DrawList;
