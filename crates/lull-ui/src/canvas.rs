use lull_api::HostApi;

use crate::geom::PxRect;

/// Where a display pass sends its draw submissions.
///
/// The module never renders itself. In production the sink is the host's
/// callback table; tests record the calls instead.
pub trait Canvas {
    /// Background color as `0xRRGGBBAA`.
    fn clear(&self, rgba: u32);
    fn draw_box(&self, rect: PxRect, alt: bool);
    /// Text centered in `rect`.
    fn draw_label(&self, rect: PxRect, text: &str);
    /// Fixed-cell text; `attr` is a VGA attribute byte.
    fn debug_text(&self, col: i32, row: i32, attr: u8, text: &str);
}

impl Canvas for HostApi {
    fn clear(&self, rgba: u32) {
        HostApi::clear(self, rgba);
    }

    fn draw_box(&self, rect: PxRect, alt: bool) {
        HostApi::draw_box(self, rect.x, rect.y, rect.w, rect.h, alt);
    }

    fn draw_label(&self, rect: PxRect, text: &str) {
        HostApi::draw_label(self, rect.x, rect.y, rect.w, rect.h, text);
    }

    fn debug_text(&self, col: i32, row: i32, attr: u8, text: &str) {
        HostApi::debug_text(self, col, row, attr, text);
    }
}

/// Drops everything. Used when the host lends no callback table.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&self, _rgba: u32) {}
    fn draw_box(&self, _rect: PxRect, _alt: bool) {}
    fn draw_label(&self, _rect: PxRect, _text: &str) {}
    fn debug_text(&self, _col: i32, _row: i32, _attr: u8, _text: &str) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Drawn {
        Clear(u32),
        Box(PxRect, bool),
        Label(PxRect, String),
        Debug { col: i32, row: i32, attr: u8, text: String },
    }

    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        drawn: RefCell<Vec<Drawn>>,
    }

    impl Recorder {
        pub(crate) fn take(&self) -> Vec<Drawn> {
            self.drawn.take()
        }

        pub(crate) fn is_empty(&self) -> bool {
            self.drawn.borrow().is_empty()
        }
    }

    impl Canvas for Recorder {
        fn clear(&self, rgba: u32) {
            self.drawn.borrow_mut().push(Drawn::Clear(rgba));
        }

        fn draw_box(&self, rect: PxRect, alt: bool) {
            self.drawn.borrow_mut().push(Drawn::Box(rect, alt));
        }

        fn draw_label(&self, rect: PxRect, text: &str) {
            self.drawn.borrow_mut().push(Drawn::Label(rect, text.to_owned()));
        }

        fn debug_text(&self, col: i32, row: i32, attr: u8, text: &str) {
            self.drawn.borrow_mut().push(Drawn::Debug {
                col,
                row,
                attr,
                text: text.to_owned(),
            });
        }
    }
}
