use core::fmt;

use crate::geom::PxRect;
use crate::pass::Pass;

/// Text centered in `rect`. Display only.
pub fn label(pass: &mut Pass<'_>, rect: PxRect, text: impl fmt::Display) {
    if pass.displays() {
        pass.draw_label(rect, text);
    }
}

#[cfg(test)]
mod tests {
    use lull_api::UpdateFlags;

    use super::*;
    use crate::canvas::recording::Drawn;
    use crate::pass::harness::Harness;

    #[test]
    fn label_never_touches_the_report() {
        let mut h = Harness::new();
        let rect = PxRect::new(40, 40, 80, 20);
        h.run(UpdateFlags::all(), |p| label(p, rect, "plonk1"));
        assert!(h.report.is_idle());
        assert_eq!(h.canvas.take(), vec![Drawn::Label(rect, "plonk1".into())]);
    }
}
