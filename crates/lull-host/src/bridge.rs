use core::ffi::c_void;

use lull_api::{str_from_raw, HostApi, LogLevel};
use lull_engine::coords::Rect;
use lull_engine::logging::module_log;
use lull_engine::paint::Color;
use lull_engine::scene::DrawList;

/// Receiving end of the module's callbacks.
///
/// [`api`](Self::api) lends a callback table whose `ctx` points back here.
/// Draw calls land in the draw list only while the bridge is armed for a
/// display pass; logging always goes through.
#[derive(Debug, Default)]
pub struct Bridge {
    list: DrawList,
    drawing: bool,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback table for one update call. The table holds a raw pointer to
    /// `self`; it must not outlive the call, and `self` must not be touched
    /// while the module runs.
    pub fn api(&mut self, drawing: bool) -> HostApi {
        if drawing {
            self.list.reset();
        }
        self.drawing = drawing;
        HostApi {
            ctx: (self as *mut Bridge).cast::<c_void>(),
            log: on_log,
            clear: on_clear,
            draw_box: on_draw_box,
            draw_label: on_draw_label,
            debug_text: on_debug_text,
        }
    }

    /// Stops accepting draw calls.
    pub fn disarm(&mut self) {
        self.drawing = false;
    }

    pub fn list(&self) -> &DrawList {
        &self.list
    }

    /// Host-side additions after the module's display pass.
    pub fn list_mut(&mut self) -> &mut DrawList {
        &mut self.list
    }
}

fn with_list(ctx: *mut c_void, f: impl FnOnce(&mut DrawList)) {
    // SAFETY: `ctx` comes from `Bridge::api`, whose contract keeps the
    // bridge alive and otherwise unborrowed during the call.
    let Some(bridge) = (unsafe { ctx.cast::<Bridge>().as_mut() }) else {
        return;
    };
    if bridge.drawing {
        f(&mut bridge.list);
    } else {
        log::trace!("draw call outside a display pass dropped");
    }
}

/// # Safety
/// `ptr`/`len` as in [`str_from_raw`].
unsafe fn text<'a>(ptr: *const u8, len: usize) -> &'a str {
    // SAFETY: forwarded to the caller.
    match unsafe { str_from_raw(ptr, len) } {
        Some(s) => s,
        None => {
            log::debug!("module passed invalid text ({len} bytes)");
            ""
        }
    }
}

extern "C" fn on_log(_ctx: *mut c_void, level: u32, msg: *const u8, msg_len: usize) {
    // SAFETY: the module lends `msg` for the duration of the callback.
    let msg = unsafe { text(msg, msg_len) };
    module_log(LogLevel::from_raw(level), msg);
}

extern "C" fn on_clear(ctx: *mut c_void, rgba: u32) {
    with_list(ctx, |list| list.set_clear(Color::from_rgba_u32(rgba)));
}

extern "C" fn on_draw_box(ctx: *mut c_void, x: i32, y: i32, w: i32, h: i32, alt: bool) {
    with_list(ctx, |list| list.push_box(Rect::from_px(x, y, w, h), alt));
}

extern "C" fn on_draw_label(
    ctx: *mut c_void,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    text_ptr: *const u8,
    text_len: usize,
) {
    // SAFETY: the module lends the text for the duration of the callback.
    let label = unsafe { text(text_ptr, text_len) };
    with_list(ctx, |list| list.push_label(Rect::from_px(x, y, w, h), label));
}

extern "C" fn on_debug_text(
    ctx: *mut c_void,
    col: i32,
    row: i32,
    attr: u8,
    text_ptr: *const u8,
    text_len: usize,
) {
    // SAFETY: the module lends the text for the duration of the callback.
    let line = unsafe { text(text_ptr, text_len) };
    with_list(ctx, |list| list.push_debug_text(col, row, attr, line));
}
