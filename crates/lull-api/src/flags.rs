use bitflags::bitflags;

bitflags! {
    /// Phases requested from a single module update call.
    ///
    /// Passed across the boundary as a raw `u32`; unknown bits are dropped on
    /// the receiving side.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u32 {
        /// Consume the input snapshot, mutate widget state, fill the report.
        const PROCESS_INPUTS = 1 << 0;
        /// Emit draw submissions. Must not mutate widget state.
        const DISPLAY        = 1 << 1;
    }
}

impl UpdateFlags {
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }

    #[inline]
    pub fn processes_inputs(self) -> bool {
        self.contains(Self::PROCESS_INPUTS)
    }

    #[inline]
    pub fn displays(self) -> bool {
        self.contains(Self::DISPLAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip_drops_unknown_bits() {
        let flags = UpdateFlags::from_raw(0b1111);
        assert_eq!(flags, UpdateFlags::PROCESS_INPUTS | UpdateFlags::DISPLAY);
    }

    #[test]
    fn empty_flags_request_nothing() {
        let flags = UpdateFlags::from_raw(0);
        assert!(!flags.processes_inputs());
        assert!(!flags.displays());
    }
}
