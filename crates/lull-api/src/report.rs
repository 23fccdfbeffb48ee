/// Staleness report produced by one update pass.
///
/// Both fields only move in one direction during a pass: the frame counter
/// grows, the validity shrinks. Every producer can therefore write its
/// constraint independently and the result does not depend on call order.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Report {
    /// Additional frames, starting with the current one, that must be redrawn.
    pub outdated_frames_n: i32,
    /// Time-to-live of the current output, in milliseconds from the frame time.
    pub validity_ms: f64,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            outdated_frames_n: 0,
            validity_ms: f64::INFINITY,
        }
    }
}

impl Report {
    /// The current output is out of date.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.request_frames(1);
    }

    /// At least `n` more frames must be drawn (layouts that settle over
    /// several frames).
    #[inline]
    pub fn request_frames(&mut self, n: i32) {
        self.outdated_frames_n = self.outdated_frames_n.max(n);
    }

    /// The current output stops being valid `ttl_ms` after the frame time.
    ///
    /// NaN candidates are ignored.
    #[inline]
    pub fn tighten_validity(&mut self, ttl_ms: f64) {
        if ttl_ms < self.validity_ms {
            self.validity_ms = ttl_ms;
        }
    }

    /// Folds another report into this one.
    #[inline]
    pub fn merge(&mut self, other: &Report) {
        self.request_frames(other.outdated_frames_n);
        self.tighten_validity(other.validity_ms);
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.outdated_frames_n > 0
    }

    /// No redraw requested and no expiry.
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.is_dirty() && self.validity_ms == f64::INFINITY
    }
}
