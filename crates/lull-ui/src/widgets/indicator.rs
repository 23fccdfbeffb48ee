use crate::geom::PxRect;
use crate::pass::Pass;

/// Box showing a boolean, highlighted while `on`. Display only.
pub fn indicator(pass: &mut Pass<'_>, rect: PxRect, on: bool) {
    pass.draw_box(rect, on);
}
