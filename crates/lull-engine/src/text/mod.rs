//! Font loading and text measurement.

mod font_system;

pub use font_system::{substitute_missing, FontId, FontLoadError, FontSystem};
