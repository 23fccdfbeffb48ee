//! Immediate-mode widget procedures.
//!
//! Each widget is a plain function called under whatever phases the pass
//! carries. Input handling writes the pass's report; drawing only reads
//! persistent state.

mod button;
mod indicator;
mod label;
mod toggle;

pub use button::button;
pub use indicator::indicator;
pub use label::label;
pub use toggle::toggle;
