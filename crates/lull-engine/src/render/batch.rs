use bytemuck::{Pod, Zeroable};
use fontdue::layout::{
    CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle,
};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DebugTextCmd, DrawCmd, DrawList, LabelCmd};
use crate::text::{FontId, FontSystem};

use super::atlas::{AtlasSlot, GlyphAtlas, Upload};
use super::palette::attr_colors;
use super::style::Style;

const MODE_SOLID: f32 = 0.0;
const MODE_GLYPH: f32 = 1.0;

/// One instanced quad (64 bytes).
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
///  offset 48  mode     f32        loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub dst_min: [f32; 2],
    pub dst_max: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
    pub mode: f32,
    pub _pad: [f32; 3],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4,
        6 => Float32
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn solid(rect: Rect, color: Color) -> Self {
        let max = rect.max();
        Self {
            dst_min: [rect.origin.x, rect.origin.y],
            dst_max: [max.x, max.y],
            uv_min: [0.0; 2],
            uv_max: [0.0; 2],
            color: color.to_array(),
            mode: MODE_SOLID,
            _pad: [0.0; 3],
        }
    }

    fn glyph(origin: Vec2, w: f32, h: f32, slot: AtlasSlot, color: Color) -> Self {
        Self {
            dst_min: [origin.x, origin.y],
            dst_max: [origin.x + w, origin.y + h],
            uv_min: slot.uv_min,
            uv_max: slot.uv_max,
            color: color.to_array(),
            mode: MODE_GLYPH,
            _pad: [0.0; 3],
        }
    }
}

/// Turns a draw list into quads, rasterizing glyphs into the atlas as it
/// meets them. Pure CPU; [`super::QuadRenderer`] uploads the result.
pub struct QuadBatcher {
    atlas: GlyphAtlas,
    layout: Layout<()>,
    instances: Vec<QuadInstance>,
}

impl Default for QuadBatcher {
    fn default() -> Self {
        Self {
            atlas: GlyphAtlas::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            instances: Vec::new(),
        }
    }
}

impl QuadBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[QuadInstance] {
        &self.instances
    }

    pub(super) fn take_uploads(&mut self) -> Vec<Upload> {
        self.atlas.take_uploads()
    }

    /// Rebuilds the instance list for `list`. Text is skipped when no font
    /// is available; boxes and debug cell backgrounds are still produced.
    pub fn build(
        &mut self,
        list: &DrawList,
        fonts: &FontSystem,
        font: Option<FontId>,
        style: &Style,
    ) -> &[QuadInstance] {
        self.instances.clear();
        let font = font.filter(|id| fonts.get(*id).is_some());
        let cell = Vec2::new(
            match font {
                Some(id) => fonts.cell_size(id, style.debug_px).x,
                None => (style.debug_px * 0.6).ceil(),
            },
            style.debug_cell_height,
        );

        for cmd in list.iter() {
            match cmd {
                DrawCmd::Box { rect, alt } => self.push_box(*rect, *alt, style),
                DrawCmd::Label(label) => {
                    if let Some(id) = font {
                        self.push_label(fonts, id, label, style);
                    }
                }
                DrawCmd::DebugText(text) => self.push_debug_text(fonts, font, text, cell, style),
            }
        }
        &self.instances
    }

    fn push_box(&mut self, rect: Rect, alt: bool, style: &Style) {
        self.instances.push(QuadInstance::solid(rect, style.box_border));
        let inner = rect.inset(style.border_px);
        if !inner.is_empty() {
            let fill = if alt { style.box_fill_alt } else { style.box_fill };
            self.instances.push(QuadInstance::solid(inner, fill));
        }
    }

    fn push_label(&mut self, fonts: &FontSystem, id: FontId, label: &LabelCmd, style: &Style) {
        let Some(font) = fonts.get(id) else { return };
        let text = fonts.displayable(id, &label.text);
        let size = style.label_px;

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[font], &TextStyle::new(&text, size, 0));

        let extent = fonts.measure_text(&text, id, size);
        let origin = Vec2::new(
            label.rect.origin.x + (label.rect.size.x - extent.x) * 0.5,
            label.rect.origin.y + (label.rect.size.y - extent.y) * 0.5,
        )
        .round();

        for g in self.layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let Some(slot) = self.atlas.slot(g.key, || raster(font, g.key)) else {
                continue;
            };
            self.instances.push(QuadInstance::glyph(
                origin + Vec2::new(g.x, g.y),
                g.width as f32,
                g.height as f32,
                slot,
                style.label_color,
            ));
        }
    }

    fn push_debug_text(
        &mut self,
        fonts: &FontSystem,
        font: Option<FontId>,
        cmd: &DebugTextCmd,
        cell: Vec2,
        style: &Style,
    ) {
        let text = match font {
            Some(id) => fonts.displayable(id, &cmd.text),
            None => cmd.text.as_str().into(),
        };
        let cells = text.chars().count();
        let (fg, bg) = attr_colors(cmd.attr);
        let x0 = cmd.col as f32 * cell.x;
        let y0 = cmd.row as f32 * cell.y;

        self.instances.push(QuadInstance::solid(
            Rect::new(x0, y0, cells as f32 * cell.x, cell.y),
            bg,
        ));

        let Some(font) = font.and_then(|id| fonts.get(id)) else {
            return;
        };
        let px = style.debug_px;
        let (ascent, line) = font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.ascent - m.descent))
            .unwrap_or((px, px * 1.2));
        let baseline = y0 + ((cell.y - line) * 0.5).max(0.0) + ascent;

        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let key = GlyphRasterConfig {
                glyph_index: font.lookup_glyph_index(c),
                px,
                font_hash: font.file_hash(),
            };
            let m = font.metrics_indexed(key.glyph_index, px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            let Some(slot) = self.atlas.slot(key, || raster(font, key)) else {
                continue;
            };
            let cell_x = x0 + i as f32 * cell.x;
            let pen = cell_x + ((cell.x - m.advance_width) * 0.5).max(0.0);
            let origin = Vec2::new(
                pen + m.xmin as f32,
                baseline - (m.height as f32 + m.ymin as f32),
            )
            .round();
            self.instances.push(QuadInstance::glyph(
                origin,
                m.width as f32,
                m.height as f32,
                slot,
                fg,
            ));
        }
    }
}

fn raster(font: &fontdue::Font, key: GlyphRasterConfig) -> (u32, u32, Vec<u8>) {
    let (m, bitmap) = font.rasterize_config(key);
    (m.width as u32, m.height as u32, bitmap)
}
