use crate::paint::Color;

/// The 16 VGA text-mode colors, `0xRRGGBB`.
pub const VGA_PALETTE: [u32; 16] = [
    0x000000, 0x0000aa, 0x00aa00, 0x00aaaa, 0xaa0000, 0xaa00aa, 0xaa5500, 0xaaaaaa,
    0x555555, 0x5555ff, 0x55ff55, 0x55ffff, 0xff5555, 0xff55ff, 0xffff55, 0xffffff,
];

/// Foreground and background of a VGA attribute byte.
pub fn attr_colors(attr: u8) -> (Color, Color) {
    let fg = VGA_PALETTE[usize::from(attr & 0x0f)];
    let bg = VGA_PALETTE[usize::from(attr >> 4)];
    (opaque(fg), opaque(bg))
}

fn opaque(rgb: u32) -> Color {
    Color::from_rgba_u32((rgb << 8) | 0xff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_on_black() {
        let (fg, bg) = attr_colors(0x0f);
        assert_eq!(fg, Color::WHITE);
        assert_eq!(bg, Color::BLACK);
    }

    #[test]
    fn white_on_blue() {
        let (fg, bg) = attr_colors(0x1f);
        assert_eq!(fg, Color::WHITE);
        assert_eq!(bg, Color::from_srgb_u8(0x00, 0x00, 0xaa, 0xff));
    }
}
