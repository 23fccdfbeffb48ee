use super::Vec2;

/// Axis-aligned rectangle in framebuffer pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// From the integer box the module submits.
    #[inline]
    pub fn from_px(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect::new(x as f32, y as f32, w as f32, h as f32)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Shrinks every edge by `d`; collapses to zero size instead of inverting.
    #[inline]
    pub fn inset(self, d: f32) -> Self {
        let r = self.normalized();
        let w = (r.size.x - 2.0 * d).max(0.0);
        let h = (r.size.y - 2.0 * d).max(0.0);
        Rect::new(r.origin.x + d, r.origin.y + d, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.y >= r.origin.y && p.x < max.x && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_flips_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_all_edges() {
        assert_eq!(r(40.0, 40.0, 80.0, 80.0).inset(2.0), r(42.0, 42.0, 76.0, 76.0));
    }

    #[test]
    fn inset_collapses_instead_of_inverting() {
        let i = r(0.0, 0.0, 3.0, 3.0).inset(2.0);
        assert!(i.is_empty());
        assert_eq!(i.size, Vec2::zero());
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let b = r(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Vec2::new(0.0, 0.0)));
        assert!(b.contains(Vec2::new(9.5, 9.5)));
        assert!(!b.contains(Vec2::new(10.0, 10.0)));
        assert!(!b.contains(Vec2::new(-1.0, 5.0)));
    }

    // ── from_px / center ──────────────────────────────────────────────────

    #[test]
    fn from_px_and_center() {
        let b = Rect::from_px(40, 64, 80, 20);
        assert_eq!(b.center(), Vec2::new(80.0, 74.0));
        assert_eq!(b.max(), Vec2::new(120.0, 84.0));
    }
}
