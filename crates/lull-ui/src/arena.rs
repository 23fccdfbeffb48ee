use core::fmt::{self, Write as _};

/// Upper bound on scratch bytes per update call.
pub const SCRATCH_LIMIT: usize = 16 << 20;

/// The scratch arena could not hold a formatted string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArenaExhausted {
    /// Bytes the arena would have needed to satisfy the request.
    pub requested: usize,
    pub limit: usize,
}

impl fmt::Display for ArenaExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scratch arena exhausted: {} bytes requested, limit is {}",
            self.requested, self.limit
        )
    }
}

impl std::error::Error for ArenaExhausted {}

/// Bump buffer for strings that live for one update call.
///
/// Every [`format`](Self::format) appends to the buffer; nothing is freed
/// until [`reset`](Self::reset). The backing storage grows on demand up to
/// `limit` and is kept across resets.
#[derive(Debug)]
pub struct ScratchArena {
    buf: String,
    limit: usize,
    max_requested: usize,
}

impl ScratchArena {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
            max_requested: 0,
        }
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// High-water mark, including requests that did not fit.
    #[inline]
    pub fn max_requested(&self) -> usize {
        self.max_requested
    }

    /// Formats `value` into the arena.
    ///
    /// On exhaustion the partial write is rolled back and the arena keeps
    /// whatever it held before the call.
    pub fn format(&mut self, value: impl fmt::Display) -> Result<&str, ArenaExhausted> {
        let start = self.buf.len();
        let mut w = Bounded {
            buf: &mut self.buf,
            limit: self.limit,
            overflow: 0,
        };
        let written = write!(w, "{value}");
        let requested = w.buf.len() + w.overflow;
        self.max_requested = self.max_requested.max(requested);

        match written {
            Ok(()) => Ok(&self.buf[start..]),
            Err(_) => {
                self.buf.truncate(start);
                Err(ArenaExhausted {
                    requested,
                    limit: self.limit,
                })
            }
        }
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::with_limit(SCRATCH_LIMIT)
    }
}

struct Bounded<'a> {
    buf: &'a mut String,
    limit: usize,
    overflow: usize,
}

impl fmt::Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.overflow > 0 || self.buf.len() + s.len() > self.limit {
            self.overflow += s.len();
            return Err(fmt::Error);
        }
        self.buf.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_stack_up_until_reset() {
        let mut arena = ScratchArena::with_limit(64);
        assert_eq!(arena.format(format_args!("plonk{}", 1)).unwrap(), "plonk1");
        assert_eq!(arena.format(7).unwrap(), "7");
        assert_eq!(arena.used(), 7);
        arena.reset();
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.max_requested(), 7);
    }

    #[test]
    fn exhaustion_rolls_back_and_reports_the_request() {
        let mut arena = ScratchArena::with_limit(8);
        arena.format("abcd").unwrap();
        let err = arena.format("efghijkl").unwrap_err();
        assert_eq!(err, ArenaExhausted { requested: 12, limit: 8 });
        assert_eq!(arena.used(), 4);
        assert_eq!(arena.max_requested(), 12);
        // Still usable for what fits.
        assert_eq!(arena.format("efgh").unwrap(), "efgh");
    }

    #[test]
    fn high_water_survives_reset() {
        let mut arena = ScratchArena::with_limit(1024);
        arena.format("x".repeat(100)).unwrap();
        arena.reset();
        arena.format("y").unwrap();
        assert_eq!(arena.max_requested(), 100);
    }

    #[test]
    fn default_limit_is_sixteen_mebibytes() {
        assert_eq!(ScratchArena::default().limit(), 16 * 1024 * 1024);
    }
}
