use crate::coords::Rect;

/// Text centered inside a box.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCmd {
    pub rect: Rect,
    pub text: String,
}

/// Text on the fixed debug cell grid.
///
/// `attr` is a VGA text attribute: low nibble foreground, high nibble
/// background.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugTextCmd {
    pub col: i32,
    pub row: i32,
    pub attr: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Bordered box; `alt` selects the highlighted fill.
    Box { rect: Rect, alt: bool },
    Label(LabelCmd),
    DebugText(DebugTextCmd),
}
