//! GPU rendering of a [`crate::scene::DrawList`].
//!
//! Everything the modules can draw (bordered boxes, labels, debug text
//! cells) reduces to textured or solid quads, so a single instanced pipeline
//! paints the whole list in recording order.
//!
//! Geometry is in framebuffer pixels, top-left origin, +Y down; the vertex
//! shader maps to NDC using the viewport uniform.

mod atlas;
mod batch;
mod common;
mod ctx;
mod palette;
mod quads;
mod style;

pub use batch::{QuadBatcher, QuadInstance};
pub use ctx::{RenderCtx, RenderTarget};
pub use palette::{attr_colors, VGA_PALETTE};
pub use quads::QuadRenderer;
pub use style::Style;
