use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`] and [`FontSystem::load_file`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Loaded fonts, immutable once added.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        self.load_font(&bytes)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// `text` with characters the font cannot draw replaced by `?`, or
    /// dropped when `?` is missing too.
    pub fn displayable<'a>(&self, id: FontId, text: &'a str) -> Cow<'a, str> {
        match self.get(id) {
            Some(font) => substitute_missing(text, |c| font.lookup_glyph_index(c) != 0),
            None => Cow::Borrowed(text),
        }
    }

    /// Advance extent and line height of `text` laid out on one line.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };
        let line = line_height(font, size);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w, line)
    }

    /// Cell size for fixed-grid text: the widest of `M`/`W` by one line.
    #[must_use]
    pub fn cell_size(&self, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new((size * 0.6).ceil(), (size * 1.2).ceil());
        };
        let w = ['M', 'W']
            .iter()
            .map(|&c| font.metrics(c, size).advance_width)
            .fold(0.0f32, f32::max);
        Vec2::new(w.ceil().max(1.0), line_height(font, size).ceil())
    }
}

pub(crate) fn line_height(font: &fontdue::Font, size: f32) -> f32 {
    font.horizontal_line_metrics(size)
        .map(|m| m.ascent - m.descent)
        .unwrap_or(size * 1.2)
}

/// Replaces characters failing `has_glyph` with `?`; drops them if `?`
/// fails too. Whitespace always passes.
pub fn substitute_missing(text: &str, has_glyph: impl Fn(char) -> bool) -> Cow<'_, str> {
    let drawable = |c: char| c.is_whitespace() || has_glyph(c);
    if text.chars().all(|c| drawable(c)) {
        return Cow::Borrowed(text);
    }
    let fallback = drawable('?').then_some('?');
    Cow::Owned(
        text.chars()
            .filter_map(|c| if drawable(c) { Some(c) } else { fallback })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawable_text_is_borrowed() {
        let out = substitute_missing("Frame 12", |c| c.is_ascii());
        assert!(matches!(out, Cow::Borrowed("Frame 12")));
    }

    #[test]
    fn missing_glyph_becomes_question_mark() {
        assert_eq!(substitute_missing("né", |c| c.is_ascii()), "n?");
    }

    #[test]
    fn missing_glyph_is_skipped_without_question_mark() {
        assert_eq!(substitute_missing("a?é b", |c| c == 'a' || c == 'b'), "a b");
    }

    #[test]
    fn unknown_font_measures_as_empty_line() {
        let fonts = FontSystem::new();
        let m = fonts.measure_text("abc", FontId(3), 10.0);
        assert_eq!(m.x, 0.0);
        assert!(m.y > 0.0);
    }
}
