use std::path::Path;

use anyhow::Result;
use lull_engine::core::{App, AppControl, FrameCtx, FrameOutcome, ProcessCtx};
use lull_engine::module::{FrameFence, ModuleRecord, ModuleState, RefreshOutcome};
use lull_engine::paint::Color;
use lull_engine::render::{QuadRenderer, Style};
use lull_engine::sched::FrameScheduler;
use lull_engine::scene::DrawList;
use lull_engine::text::{FontId, FontSystem};

use crate::config::HostConfig;
use crate::session::UiSession;

/// Tried in order when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Yellow on black.
const STATS_ATTR: u8 = 0x0e;

/// Keyboard commands found in one iteration's typed text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct KeyCommands {
    pub quit: bool,
    /// Odd number of `d` presses.
    pub toggle_stats: bool,
}

impl KeyCommands {
    pub fn parse(text: &str) -> Self {
        let mut cmds = Self::default();
        for c in text.chars() {
            match c {
                'q' | 'Q' => cmds.quit = true,
                'd' | 'D' => cmds.toggle_stats = !cmds.toggle_stats,
                _ => {}
            }
        }
        cmds
    }
}

/// What the host overlay shows about the loop and the module.
#[derive(Debug, Clone, PartialEq)]
pub struct HostStats<'a> {
    pub frame_id: u64,
    pub presented: u64,
    pub skipped: u64,
    /// Milliseconds until the shown frame expires; infinite when it never does.
    pub validity_ms: f64,
    pub module_state: ModuleState,
    pub generation: u64,
    pub last_error: Option<&'a str>,
}

impl<'a> HostStats<'a> {
    pub fn collect(scheduler: &FrameScheduler, now_ms: f64, module: &'a ModuleRecord) -> Self {
        Self {
            frame_id: scheduler.frame_id(),
            presented: scheduler.presented_frames(),
            skipped: scheduler.skipped_frames(),
            validity_ms: scheduler.validity_deadline_ms() - now_ms,
            module_state: module.state(),
            generation: module.generation(),
            last_error: module.last_error(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let validity = if self.validity_ms.is_finite() {
            format!("{:.1} ms", self.validity_ms)
        } else {
            "forever".to_string()
        };
        let mut lines = vec![
            format!(
                "Host: frame {} presented {} skipped {}",
                self.frame_id, self.presented, self.skipped
            ),
            format!("Valid for: {validity}"),
            format!("Module: {:?} (generation {})", self.module_state, self.generation),
        ];
        if let Some(err) = self.last_error {
            lines.push(format!("Last load error: {err}"));
        }
        lines
    }
}

/// Appends `lines` as debug text along the bottom edge of a surface
/// `height_px` tall.
fn push_overlay(list: &mut DrawList, lines: &[String], height_px: i32, cell_px: f32) {
    let rows = (height_px as f32 / cell_px.max(1.0)) as i32;
    let first = (rows - lines.len() as i32).max(0);
    for (row, line) in (first..).zip(lines) {
        list.push_debug_text(0, row, STATS_ATTR, line.as_str());
    }
}

/// Loads the configured font, else the first system candidate that works.
pub fn load_font(fonts: &mut FontSystem, configured: Option<&Path>) -> Option<FontId> {
    let candidates = configured
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(Path::new));
    for path in candidates {
        match fonts.load_file(path) {
            Ok(id) => {
                log::info!("using font {}", path.display());
                return Some(id);
            }
            Err(e) => log::debug!("font {}: {e}", path.display()),
        }
    }
    log::warn!("no usable font found; labels and debug text are not drawn");
    None
}

/// Runs the UI module under the frame scheduler and paints what it draws.
pub struct UiHost {
    module: ModuleRecord,
    session: UiSession,

    fonts: FontSystem,
    font: Option<FontId>,
    renderer: QuadRenderer,
    style: Style,
    clear: Color,

    poll_ms: f64,
    show_stats: bool,
    /// Set when the module was swapped or lost; the next frame must redraw.
    module_changed: bool,
}

impl UiHost {
    pub fn new(config: &HostConfig) -> Self {
        let module_path = config.module_path();
        log::info!("UI module: {}", module_path.display());
        let module = ModuleRecord::open(module_path);

        let mut fonts = FontSystem::new();
        let font = load_font(&mut fonts, config.font_path.as_deref());
        let style = Style {
            label_px: config.font_size,
            ..Style::default()
        };

        Self {
            module,
            session: UiSession::new(),
            fonts,
            font,
            renderer: QuadRenderer::new(),
            style,
            clear: Color::from_rgba_u32(config.clear_color),
            poll_ms: config.module_poll_ms,
            show_stats: false,
            module_changed: false,
        }
    }
}

impl App for UiHost {
    fn refresh(&mut self, fence: &mut dyn FrameFence) {
        match self.module.refresh(fence) {
            RefreshOutcome::Unchanged => {}
            RefreshOutcome::Reloaded | RefreshOutcome::Failed => self.module_changed = true,
        }
    }

    fn process(&mut self, ctx: &mut ProcessCtx<'_>) -> Result<AppControl> {
        let keys = KeyCommands::parse(ctx.inputs.text());
        if keys.quit {
            log::info!("quit requested");
            return Ok(AppControl::Exit);
        }
        if keys.toggle_stats {
            self.show_stats = !self.show_stats;
            ctx.report.mark_dirty();
        }

        let report = self
            .session
            .process(self.module.table(), *ctx.inputs, ctx.display)?;
        ctx.report.merge(&report);

        if std::mem::take(&mut self.module_changed) {
            ctx.report.mark_dirty();
        }
        // The overlay's counters change every frame.
        if self.show_stats {
            ctx.report.request_frames(1);
        }
        Ok(AppControl::Continue)
    }

    fn display(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<FrameOutcome> {
        let Self {
            module,
            session,
            fonts,
            font,
            renderer,
            style,
            clear,
            show_stats,
            ..
        } = self;

        let list = session.display(module.table(), *ctx.inputs, ctx.display)?;
        if *show_stats {
            let stats = HostStats::collect(ctx.scheduler, ctx.time.now_ms, module);
            push_overlay(list, &stats.lines(), ctx.display.size_px.y, style.debug_cell_height);
        }

        let clear = list.clear_color().unwrap_or(*clear);
        let list = &*list;
        let font = *font;
        Ok(ctx.render(clear, |rctx, target| {
            renderer.render(rctx, target, list, fonts, font, style)
        }))
    }

    fn wake_interval_ms(&self) -> Option<f64> {
        (self.poll_ms > 0.0).then_some(self.poll_ms)
    }
}
