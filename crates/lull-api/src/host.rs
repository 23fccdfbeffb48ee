use core::ffi::c_void;

/// Log severity carried across the boundary as `u32`.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Unknown values map to `Info`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            4 => Self::Debug,
            5 => Self::Trace,
            _ => Self::Info,
        }
    }
}

/// Callbacks the host lends to a module for one update call.
///
/// A `cdylib` module carries its own copy of every static (including the
/// `log` facade's logger), so logging and drawing go through the host.
/// Strings are passed as UTF-8 pointer + length and are only borrowed for
/// the duration of the callback.
///
/// Draw callbacks are honoured only while the host is running a `DISPLAY`
/// pass; the host drops them otherwise.
#[repr(C)]
pub struct HostApi {
    pub ctx: *mut c_void,
    pub log: extern "C" fn(ctx: *mut c_void, level: u32, msg: *const u8, msg_len: usize),
    /// Background color as `0xRRGGBBAA`.
    pub clear: extern "C" fn(ctx: *mut c_void, rgba: u32),
    pub draw_box: extern "C" fn(ctx: *mut c_void, x: i32, y: i32, w: i32, h: i32, alt: bool),
    pub draw_label: extern "C" fn(
        ctx: *mut c_void,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        text: *const u8,
        text_len: usize,
    ),
    /// Fixed-cell debug text. `attr` is a VGA-style attribute byte: low
    /// nibble foreground, high nibble background.
    pub debug_text: extern "C" fn(
        ctx: *mut c_void,
        col: i32,
        row: i32,
        attr: u8,
        text: *const u8,
        text_len: usize,
    ),
}

impl HostApi {
    #[inline]
    pub fn log(&self, level: LogLevel, msg: &str) {
        (self.log)(self.ctx, level as u32, msg.as_ptr(), msg.len());
    }

    #[inline]
    pub fn clear(&self, rgba: u32) {
        (self.clear)(self.ctx, rgba);
    }

    #[inline]
    pub fn draw_box(&self, x: i32, y: i32, w: i32, h: i32, alt: bool) {
        (self.draw_box)(self.ctx, x, y, w, h, alt);
    }

    #[inline]
    pub fn draw_label(&self, x: i32, y: i32, w: i32, h: i32, text: &str) {
        (self.draw_label)(self.ctx, x, y, w, h, text.as_ptr(), text.len());
    }

    #[inline]
    pub fn debug_text(&self, col: i32, row: i32, attr: u8, text: &str) {
        (self.debug_text)(self.ctx, col, row, attr, text.as_ptr(), text.len());
    }
}

/// Rebuilds a borrowed `&str` from callback arguments.
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes for `'a`, or `len` must be 0.
pub unsafe fn str_from_raw<'a>(ptr: *const u8, len: usize) -> Option<&'a str> {
    if len == 0 {
        return Some("");
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: forwarded to the caller.
    let bytes = unsafe { core::slice::from_raw_parts(ptr, len) };
    core::str::from_utf8(bytes).ok()
}
