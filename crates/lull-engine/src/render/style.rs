use crate::paint::Color;

/// Colors and sizes used to turn draw commands into quads.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub box_border: Color,
    pub box_fill: Color,
    pub box_fill_alt: Color,
    pub border_px: f32,
    pub label_color: Color,
    pub label_px: f32,
    /// Font size for debug text; cell width is derived from it.
    pub debug_px: f32,
    /// Debug rows are this many pixels apart, so a module can map a layout
    /// y coordinate to a row.
    pub debug_cell_height: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            box_border: Color::from_srgb_u8(0x30, 0x30, 0x30, 0xff),
            box_fill: Color::from_srgb_u8(0xdc, 0xdc, 0xdc, 0xff),
            box_fill_alt: Color::from_srgb_u8(0xf0, 0xa0, 0x30, 0xff),
            border_px: 2.0,
            label_color: Color::BLACK,
            label_px: 20.0,
            debug_px: 12.0,
            debug_cell_height: 14.0,
        }
    }
}
