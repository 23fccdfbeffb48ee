use core::fmt;
use core::ops::{Add, Sub};

use crate::host::HostApi;
use crate::persist::PersistentState;
use crate::report::Report;

/// Capacity of the per-frame text buffer, in bytes.
pub const TEXT_CAPACITY: usize = 256;

/// Integer 2D vector in framebuffer pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Int2 {
    pub x: i32,
    pub y: i32,
}

impl Int2 {
    pub const ZERO: Int2 = Int2 { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Int2 {
    type Output = Int2;
    #[inline]
    fn add(self, rhs: Int2) -> Int2 {
        Int2::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Int2 {
    type Output = Int2;
    #[inline]
    fn sub(self, rhs: Int2) -> Int2 {
        Int2::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

/// Button with per-frame transition edges.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DigitalButton {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

impl DigitalButton {
    /// Pressed or released since the previous frame.
    #[inline]
    pub fn transitioned(&self) -> bool {
        self.pressed || self.released
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Mouse {
    pub left: DigitalButton,
    pub right: DigitalButton,
    pub wheel: i32,
    pub delta_wheel: i32,
    pub position: Int2,
    pub delta_position: Int2,
}

/// Immutable per-frame input snapshot.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct Inputs {
    /// Monotonic frame time in milliseconds since host start.
    pub frame_ms: f64,
    pub frame_id: u64,
    pub mouse: Mouse,
    text: [u8; TEXT_CAPACITY],
    text_len: usize,
}

impl Inputs {
    pub fn new(frame_ms: f64, frame_id: u64, mouse: Mouse) -> Self {
        Self {
            frame_ms,
            frame_id,
            mouse,
            text: [0; TEXT_CAPACITY],
            text_len: 0,
        }
    }

    /// Text typed since the previous snapshot.
    ///
    /// Never fails: a buffer corrupted on the other side of the boundary
    /// yields its longest valid UTF-8 prefix.
    pub fn text(&self) -> &str {
        let bytes = &self.text[..self.text_len.min(TEXT_CAPACITY)];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// Appends `s`, truncating on a char boundary at [`TEXT_CAPACITY`].
    ///
    /// Returns `false` when some of `s` did not fit.
    pub fn push_text(&mut self, s: &str) -> bool {
        let room = TEXT_CAPACITY - self.text_len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.text[self.text_len..self.text_len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.text_len += take;
        take == s.len()
    }

    pub fn clear_text(&mut self) {
        self.text_len = 0;
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self::new(0.0, 0, Mouse::default())
    }
}

impl fmt::Debug for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("frame_ms", &self.frame_ms)
            .field("frame_id", &self.frame_id)
            .field("mouse", &self.mouse)
            .field("text", &self.text())
            .finish()
    }
}

/// One display per UI.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Display {
    /// The display changed size since the previous frame.
    pub resized: bool,
    pub size_px: Int2,
}

/// Fault code written by a module when it hits a defect it cannot recover from.
///
/// The host treats any non-zero fault as fatal.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fault(pub u32);

impl Fault {
    pub const NONE: Fault = Fault(0);
    /// The per-frame scratch arena could not satisfy an allocation.
    pub const SCRATCH_EXHAUSTED: Fault = Fault(1);

    #[inline]
    pub fn is_fault(self) -> bool {
        self != Fault::NONE
    }

    pub fn describe(self) -> &'static str {
        match self {
            Fault::NONE => "no fault",
            Fault::SCRATCH_EXHAUSTED => "scratch arena exhausted",
            _ => "unknown fault",
        }
    }
}

/// Everything one update call sees.
///
/// `host` and `state` are borrowed from the host for the duration of a single
/// update call and must not be retained by the module.
#[repr(C)]
pub struct Ui {
    pub inputs: Inputs,
    pub display: Display,
    pub report: Report,
    pub fault: Fault,
    pub host: *const HostApi,
    pub state: *mut PersistentState,
}

/// Split borrow of a [`Ui`]'s fields with the raw pointers resolved.
pub struct UiView<'a> {
    pub inputs: &'a Inputs,
    pub display: &'a Display,
    pub report: &'a mut Report,
    pub fault: &'a mut Fault,
    pub host: Option<&'a HostApi>,
    pub state: Option<&'a mut PersistentState>,
}

impl Ui {
    pub fn new(
        inputs: Inputs,
        display: Display,
        host: *const HostApi,
        state: *mut PersistentState,
    ) -> Self {
        Self {
            inputs,
            display,
            report: Report::default(),
            fault: Fault::NONE,
            host,
            state,
        }
    }

    /// Records `fault` unless an earlier one is already set.
    pub fn raise(&mut self, fault: Fault) {
        if !self.fault.is_fault() {
            self.fault = fault;
        }
    }

    /// Borrows every field at once.
    ///
    /// # Safety
    /// `host` and `state` must each be null or point to live, properly
    /// aligned values not otherwise borrowed for the lifetime of the view.
    pub unsafe fn view(&mut self) -> UiView<'_> {
        let Ui {
            inputs,
            display,
            report,
            fault,
            host,
            state,
        } = self;
        // SAFETY: forwarded to the caller.
        let (host, state) = unsafe { (host.as_ref(), state.as_mut()) };
        UiView {
            inputs,
            display,
            report,
            fault,
            host,
            state,
        }
    }
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("inputs", &self.inputs)
            .field("display", &self.display)
            .field("report", &self.report)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}
