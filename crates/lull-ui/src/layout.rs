use lull_api::Int2;

use crate::geom::PxRect;

/// Direction a scope steps along.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Items left to right; a parent on this axis catches up in columns.
    Horizontal,
    /// Items top to bottom; a parent on this axis catches up in rows.
    Vertical,
}

/// Cursor-driven layout scope.
///
/// There is no measuring pass. A scope owns a cursor and the furthest point
/// any item placed in it reached (`extent`). Child scopes start at the
/// parent's cursor; when a child finishes, the parent cursor advances along
/// the parent's axis in whole rhythm steps until it is at or past the
/// child's extent. Siblings therefore start where the previous sibling's
/// catch-up left the cursor, never where the sibling's own cursor ended.
///
/// `rhythm.x` is the column step, `rhythm.y` the row step.
#[derive(Debug, Clone)]
pub struct LayoutScope {
    axis: Axis,
    cursor: Int2,
    extent: Int2,
    rhythm: Int2,
}

impl LayoutScope {
    pub fn new(origin: Int2, axis: Axis, rhythm: Int2) -> Self {
        Self {
            axis,
            cursor: origin,
            extent: origin,
            rhythm,
        }
    }

    #[inline]
    pub fn cursor(&self) -> Int2 {
        self.cursor
    }

    #[inline]
    pub fn extent(&self) -> Int2 {
        self.extent
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn advance(&mut self, delta: Int2) {
        self.cursor = self.cursor + delta;
        self.reach(self.cursor);
    }

    /// One rhythm step along the scope's axis.
    pub fn step(&mut self) {
        let delta = match self.axis {
            Axis::Horizontal => Int2::new(self.rhythm.x, 0),
            Axis::Vertical => Int2::new(0, self.rhythm.y),
        };
        self.advance(delta);
    }

    /// Box at the cursor. The cursor stays put; the extent grows to cover it.
    pub fn place(&mut self, w: i32, h: i32) -> PxRect {
        let rect = PxRect::at(self.cursor, w, h);
        self.reach(rect.max());
        rect
    }

    /// [`place`](Self::place) followed by [`step`](Self::step).
    pub fn next(&mut self, w: i32, h: i32) -> PxRect {
        let rect = self.place(w, h);
        self.step();
        rect
    }

    /// Runs `f` in a horizontal child scope, then catches up.
    pub fn row<R>(&mut self, f: impl FnOnce(&mut LayoutScope) -> R) -> R {
        self.nested(Axis::Horizontal, f)
    }

    /// Runs `f` in a vertical child scope, then catches up.
    pub fn column<R>(&mut self, f: impl FnOnce(&mut LayoutScope) -> R) -> R {
        self.nested(Axis::Vertical, f)
    }

    fn nested<R>(&mut self, axis: Axis, f: impl FnOnce(&mut LayoutScope) -> R) -> R {
        let mut child = LayoutScope::new(self.cursor, axis, self.rhythm);
        let out = f(&mut child);
        self.finish(child);
        out
    }

    /// Folds a finished child back into this scope.
    pub fn finish(&mut self, child: LayoutScope) {
        match self.axis {
            Axis::Vertical => {
                self.cursor.y = catch_up(self.cursor.y, child.extent.y, self.rhythm.y);
            }
            Axis::Horizontal => {
                self.cursor.x = catch_up(self.cursor.x, child.extent.x, self.rhythm.x);
            }
        }
        self.reach(child.extent);
        self.reach(self.cursor);
    }

    fn reach(&mut self, p: Int2) {
        self.extent.x = self.extent.x.max(p.x);
        self.extent.y = self.extent.y.max(p.y);
    }
}

/// Smallest `pos + k * step >= target` with `k >= 0`. A non-positive step
/// jumps straight to the target.
fn catch_up(pos: i32, target: i32, step: i32) -> i32 {
    let gap = target.saturating_sub(pos);
    if gap <= 0 {
        return pos;
    }
    if step <= 0 {
        return target;
    }
    let steps = gap / step + i32::from(gap % step != 0);
    pos.saturating_add(steps.saturating_mul(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_at(x: i32, y: i32, rhythm: Int2) -> LayoutScope {
        LayoutScope::new(Int2::new(x, y), Axis::Vertical, rhythm)
    }

    // ── catch-up ──────────────────────────────────────────────────────────

    #[test]
    fn nested_scopes_land_parent_on_furthest_extent() {
        let mut layout = column_at(40, 40, Int2::new(96, 40));
        layout.column(|c| c.advance(Int2::new(0, 80)));
        layout.column(|c| c.advance(Int2::new(0, 40)));
        assert_eq!(layout.cursor(), Int2::new(40, 160));
    }

    #[test]
    fn catch_up_rounds_to_whole_rows() {
        let mut layout = column_at(40, 40, Int2::new(96, 24));
        layout.row(|r| r.advance(Int2::new(0, 80)));
        // 40 + 4 * 24 is the first row at or past 120.
        assert_eq!(layout.cursor(), Int2::new(40, 136));
    }

    #[test]
    fn catch_up_uses_extent_not_final_cursor() {
        let mut layout = column_at(40, 40, Int2::new(96, 24));
        layout.row(|r| {
            r.next(80, 80);
            r.next(80, 20);
        });
        assert_eq!(layout.cursor().y, 136);
    }

    #[test]
    fn child_already_behind_parent_leaves_it_alone() {
        let mut layout = column_at(0, 100, Int2::new(10, 10));
        layout.column(|c| c.advance(Int2::new(0, -30)));
        assert_eq!(layout.cursor(), Int2::new(0, 100));
    }

    #[test]
    fn zero_rhythm_jumps_to_extent() {
        let mut layout = column_at(0, 0, Int2::ZERO);
        layout.row(|r| {
            r.place(10, 33);
        });
        assert_eq!(layout.cursor().y, 33);
    }

    // ── siblings ──────────────────────────────────────────────────────────

    #[test]
    fn child_starts_at_parent_cursor() {
        let mut layout = column_at(40, 40, Int2::new(96, 24));
        layout.step();
        let start = layout.row(|r| r.cursor());
        assert_eq!(start, Int2::new(40, 64));
    }

    #[test]
    fn row_items_step_by_column_rhythm_and_parent_x_is_untouched() {
        let mut layout = column_at(40, 40, Int2::new(96, 24));
        let rects = layout.row(|r| [r.next(80, 80), r.next(80, 80), r.next(200, 80)]);
        assert_eq!(rects[0], PxRect::new(40, 40, 80, 80));
        assert_eq!(rects[1], PxRect::new(136, 40, 80, 80));
        assert_eq!(rects[2], PxRect::new(232, 40, 200, 80));
        assert_eq!(layout.cursor().x, 40);
        assert_eq!(layout.extent().x, 432);
    }

    #[test]
    fn horizontal_parent_catches_up_in_columns() {
        let mut layout = LayoutScope::new(Int2::ZERO, Axis::Horizontal, Int2::new(96, 24));
        layout.column(|c| {
            c.place(150, 10);
        });
        assert_eq!(layout.cursor(), Int2::new(192, 0));
    }

    #[test]
    fn next_steps_along_the_scope_axis() {
        let mut layout = column_at(40, 40, Int2::new(96, 24));
        let first = layout.next(300, 16);
        let second = layout.next(300, 16);
        assert_eq!(first.y, 40);
        assert_eq!(second.y, 64);
        assert_eq!(layout.axis(), Axis::Vertical);
    }
}
