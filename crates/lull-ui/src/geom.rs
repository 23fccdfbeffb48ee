use lull_api::Int2;

/// Integer box in framebuffer pixels, top-left origin.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PxRect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn at(origin: Int2, w: i32, h: i32) -> Self {
        Self::new(origin.x, origin.y, w, h)
    }

    #[inline]
    pub fn min(&self) -> Int2 {
        Int2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Int2 {
        Int2::new(self.x.saturating_add(self.w), self.y.saturating_add(self.h))
    }

    /// Closed containment: both edges count as inside, so a pointer resting
    /// on the border still hits the widget.
    #[inline]
    pub fn contains(&self, p: Int2) -> bool {
        let max = self.max();
        p.x >= self.x && p.x <= max.x && p.y >= self.y && p.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_both_edges() {
        let r = PxRect::new(40, 40, 80, 80);
        assert!(r.contains(Int2::new(40, 40)));
        assert!(r.contains(Int2::new(120, 120)));
        assert!(r.contains(Int2::new(80, 120)));
        assert!(!r.contains(Int2::new(121, 80)));
        assert!(!r.contains(Int2::new(39, 80)));
    }

    #[test]
    fn max_is_origin_plus_size() {
        assert_eq!(PxRect::new(10, 20, 5, 7).max(), Int2::new(15, 27));
        assert_eq!(PxRect::at(Int2::new(1, 2), 3, 4), PxRect::new(1, 2, 3, 4));
    }
}
