use crate::coords::Rect;
use crate::paint::Color;

use super::{DebugTextCmd, DrawCmd, LabelCmd};

/// Commands for one frame plus the clear color.
#[derive(Debug, Default)]
pub struct DrawList {
    clear: Option<Color>,
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the list for the next frame, keeping capacity. The clear
    /// color is reset too; a frame that does not set one uses the host's.
    pub fn reset(&mut self) {
        self.clear = None;
        self.cmds.clear();
    }

    pub fn set_clear(&mut self, color: Color) {
        self.clear = Some(color);
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    pub fn push_box(&mut self, rect: Rect, alt: bool) {
        let rect = rect.normalized();
        if rect.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Box { rect, alt });
    }

    pub fn push_label(&mut self, rect: Rect, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Label(LabelCmd {
            rect: rect.normalized(),
            text,
        }));
    }

    pub fn push_debug_text(&mut self, col: i32, row: i32, attr: u8, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() || col < 0 || row < 0 {
            return;
        }
        self.cmds.push(DrawCmd::DebugText(DebugTextCmd {
            col,
            row,
            attr,
            text,
        }));
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}
