//! Geometry shared by the draw list and the renderers.
//!
//! Space: framebuffer pixels, origin top-left, +X right, +Y down. Shaders
//! map to NDC through a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
