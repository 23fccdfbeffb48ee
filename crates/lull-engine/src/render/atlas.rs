use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

pub(super) const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

/// Shelf packer: fills rows left to right, opens a new row when the current
/// one is full.
#[derive(Debug)]
pub(super) struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub(super) fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    pub(super) fn is_full(&self) -> bool {
        self.full
    }

    /// Top-left corner for a `w`×`h` region, or `None` once out of space.
    pub(super) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size
            || self.cursor_y + h + GLYPH_PADDING > self.size
        {
            self.full = true;
            return None;
        }
        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct AtlasSlot {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// Coverage bitmap waiting to be copied into the atlas texture.
#[derive(Debug)]
pub(super) struct Upload {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub pixels: Vec<u8>,
}

/// CPU side of the glyph atlas: placement, cache and pending uploads.
///
/// Glyphs are rasterized on first use and kept for the atlas' lifetime.
#[derive(Debug)]
pub(super) struct GlyphAtlas {
    packer: ShelfPacker,
    cache: HashMap<GlyphRasterConfig, AtlasSlot>,
    pending: Vec<Upload>,
    warned_full: bool,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::with_size(ATLAS_SIZE)
    }
}

impl GlyphAtlas {
    pub(super) fn with_size(size: u32) -> Self {
        Self {
            packer: ShelfPacker::new(size),
            cache: HashMap::new(),
            pending: Vec::new(),
            warned_full: false,
        }
    }

    /// Cached slot for `key`, rasterizing through `raster` on a miss.
    /// `raster` returns `(width, height, coverage)`.
    pub(super) fn slot(
        &mut self,
        key: GlyphRasterConfig,
        raster: impl FnOnce() -> (u32, u32, Vec<u8>),
    ) -> Option<AtlasSlot> {
        if let Some(slot) = self.cache.get(&key) {
            return Some(*slot);
        }
        if self.packer.is_full() {
            return None;
        }
        let (w, h, pixels) = raster();
        if w == 0 || h == 0 || pixels.len() < (w * h) as usize {
            return None;
        }
        let Some((x, y)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("glyph atlas is full; some glyphs will not be drawn");
                self.warned_full = true;
            }
            return None;
        };

        let size = self.packer.size as f32;
        let slot = AtlasSlot {
            uv_min: [x as f32 / size, y as f32 / size],
            uv_max: [(x + w) as f32 / size, (y + h) as f32 / size],
        };
        self.cache.insert(key, slot);
        self.pending.push(Upload { x, y, w, h, pixels });
        Some(slot)
    }

    pub(super) fn take_uploads(&mut self) -> Vec<Upload> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(glyph_index: u16) -> GlyphRasterConfig {
        GlyphRasterConfig {
            glyph_index,
            px: 12.0,
            font_hash: 7,
        }
    }

    // ── packer ────────────────────────────────────────────────────────────

    #[test]
    fn packer_wraps_to_next_shelf() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 5), Some((1, 1)));
        assert_eq!(p.place(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: new shelf below the tallest glyph of the row.
        assert_eq!(p.place(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert_eq!(p.place(4, 4), None);
        assert!(p.is_full());
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
    }

    // ── atlas ─────────────────────────────────────────────────────────────

    #[test]
    fn glyph_is_rasterized_once() {
        let mut atlas = GlyphAtlas::with_size(64);
        let mut calls = 0;
        let a = atlas.slot(key(1), || {
            calls += 1;
            (2, 2, vec![255; 4])
        });
        let b = atlas.slot(key(1), || unreachable!());
        assert_eq!(calls, 1);
        assert_eq!(a, b);
        assert_eq!(atlas.take_uploads().len(), 1);
        assert!(atlas.take_uploads().is_empty());
    }

    #[test]
    fn empty_bitmap_gets_no_slot() {
        let mut atlas = GlyphAtlas::with_size(64);
        assert_eq!(atlas.slot(key(2), || (0, 0, Vec::new())), None);
        assert!(atlas.take_uploads().is_empty());
    }

    #[test]
    fn uv_covers_placed_region() {
        let mut atlas = GlyphAtlas::with_size(64);
        let slot = atlas.slot(key(3), || (4, 8, vec![0; 32])).unwrap();
        assert_eq!(slot.uv_min, [1.0 / 64.0, 1.0 / 64.0]);
        assert_eq!(slot.uv_max, [5.0 / 64.0, 9.0 / 64.0]);
    }
}
