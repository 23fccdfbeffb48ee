use lull_api::Int2;

/// Render target size in framebuffer pixels.
///
/// Draw commands arrive in framebuffer pixels (the module sees
/// `Display::size_px`), so no DPI scale is applied on the way to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_size_px(size: Int2) -> Self {
        Self::new(size.x.max(1) as f32, size.y.max(1) as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
