//! Colors shared between the host and the renderers.

mod color;

pub use color::Color;
