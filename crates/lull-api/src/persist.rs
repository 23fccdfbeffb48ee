use crate::timer::AnimationTimer;

/// Bumped whenever the layout of [`PersistentState`] changes.
pub const STATE_LAYOUT_VERSION: u32 = 1;

pub const MAX_TOGGLES: usize = 64;
pub const MAX_TIMERS: usize = 16;

/// Stable widget identity, derived from a name rather than call order so it
/// survives edits to the module between reloads.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

const fn fnv1a(mut hash: u32, bytes: &[u8]) -> u32 {
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

impl WidgetId {
    pub const fn from_name(name: &str) -> Self {
        Self(fnv1a(FNV_OFFSET, name.as_bytes()))
    }

    /// Id for the `index`-th widget of a repeated group.
    pub const fn indexed(name: &str, index: u32) -> Self {
        let hash = fnv1a(FNV_OFFSET, name.as_bytes());
        Self(fnv1a(hash, &index.to_le_bytes()))
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ToggleSlot {
    pub id: WidgetId,
    pub used: bool,
    pub on: bool,
    /// Snapshot (frame id + frame time) that last flipped this toggle.
    last_flip_frame: u64,
    last_flip_ms: f64,
}

impl ToggleSlot {
    const EMPTY: ToggleSlot = ToggleSlot {
        id: WidgetId(0),
        used: false,
        on: false,
        last_flip_frame: u64::MAX,
        last_flip_ms: f64::NAN,
    };

    /// Flips once per input snapshot. Re-processing the same snapshot is a
    /// no-op; returns whether the value changed.
    pub fn flip_once(&mut self, frame_id: u64, frame_ms: f64) -> bool {
        if self.last_flip_frame == frame_id && self.last_flip_ms == frame_ms {
            return false;
        }
        self.on = !self.on;
        self.last_flip_frame = frame_id;
        self.last_flip_ms = frame_ms;
        true
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimerSlot {
    pub id: WidgetId,
    pub used: bool,
    pub timer: AnimationTimer,
}

impl TimerSlot {
    const EMPTY: TimerSlot = TimerSlot {
        id: WidgetId(0),
        used: false,
        timer: AnimationTimer::new(0.0, 0.0),
    };
}

/// Widget state owned by the host so it outlives any one module image.
///
/// Fixed capacity, no pointers inside: the module can be unloaded and a new
/// one mapped in while this block stays put.
#[repr(C)]
#[derive(Debug, Clone)]
pub struct PersistentState {
    pub layout_version: u32,
    toggles: [ToggleSlot; MAX_TOGGLES],
    timers: [TimerSlot; MAX_TIMERS],
    update_count: u32,
    update_count_frame: u64,
}

impl PersistentState {
    pub fn new() -> Self {
        Self {
            layout_version: STATE_LAYOUT_VERSION,
            toggles: [ToggleSlot::EMPTY; MAX_TOGGLES],
            timers: [TimerSlot::EMPTY; MAX_TIMERS],
            update_count: 0,
            update_count_frame: u64::MAX,
        }
    }

    /// Written by a module built against this layout.
    #[inline]
    pub fn is_compatible(&self) -> bool {
        self.layout_version == STATE_LAYOUT_VERSION
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Slot for `id`, claimed on first use. `None` when every slot is taken.
    pub fn toggle(&mut self, id: WidgetId) -> Option<&mut ToggleSlot> {
        let index = find_or_claim(self.toggles.iter().map(|s| (s.used, s.id)), id)?;
        let slot = &mut self.toggles[index];
        if !slot.used {
            *slot = ToggleSlot { id, used: true, ..ToggleSlot::EMPTY };
        }
        Some(slot)
    }

    /// Current value of a toggle without claiming a slot.
    pub fn toggle_value(&self, id: WidgetId) -> bool {
        self.toggles.iter().any(|s| s.used && s.id == id && s.on)
    }

    /// Timer for `id`, created with `init` on first use.
    pub fn timer_or_insert_with(
        &mut self,
        id: WidgetId,
        init: impl FnOnce() -> AnimationTimer,
    ) -> Option<&mut AnimationTimer> {
        let index = find_or_claim(self.timers.iter().map(|s| (s.used, s.id)), id)?;
        let slot = &mut self.timers[index];
        if !slot.used {
            *slot = TimerSlot { id, used: true, timer: init() };
        }
        Some(&mut slot.timer)
    }

    pub fn timer(&self, id: WidgetId) -> Option<&AnimationTimer> {
        self.timers
            .iter()
            .find(|s| s.used && s.id == id)
            .map(|s| &s.timer)
    }

    /// Counts an update call for `frame_id` and returns how many calls this
    /// frame had seen before it.
    pub fn count_update(&mut self, frame_id: u64) -> u32 {
        if self.update_count_frame != frame_id {
            self.update_count_frame = frame_id;
            self.update_count = 0;
        }
        let seen = self.update_count;
        self.update_count = self.update_count.saturating_add(1);
        seen
    }

    /// Update calls counted so far for `frame_id`.
    pub fn updates_in_frame(&self, frame_id: u64) -> u32 {
        if self.update_count_frame == frame_id {
            self.update_count
        } else {
            0
        }
    }
}

impl Default for PersistentState {
    fn default() -> Self {
        Self::new()
    }
}

fn find_or_claim(slots: impl Iterator<Item = (bool, WidgetId)>, id: WidgetId) -> Option<usize> {
    let mut free = None;
    for (i, (used, slot_id)) in slots.enumerate() {
        if used && slot_id == id {
            return Some(i);
        }
        if !used && free.is_none() {
            free = Some(i);
        }
    }
    free
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── WidgetId ──────────────────────────────────────────────────────────

    #[test]
    fn ids_are_stable_and_distinct() {
        assert_eq!(WidgetId::from_name("debug text"), WidgetId::from_name("debug text"));
        assert_ne!(WidgetId::from_name("a"), WidgetId::from_name("b"));
        assert_ne!(WidgetId::indexed("blinker", 0), WidgetId::indexed("blinker", 1));
    }

    // ── toggles ───────────────────────────────────────────────────────────

    #[test]
    fn toggle_slot_is_claimed_once() {
        let mut state = PersistentState::new();
        let id = WidgetId::from_name("t");
        if let Some(slot) = state.toggle(id) {
            slot.on = true;
        }
        assert!(state.toggle_value(id));
        assert!(state.toggle(id).is_some_and(|s| s.on));
    }

    #[test]
    fn flip_once_ignores_repeated_snapshot() {
        let mut state = PersistentState::new();
        let id = WidgetId::from_name("t");
        let slot = state.toggle(id).unwrap();
        assert!(slot.flip_once(3, 10.0));
        assert!(!slot.flip_once(3, 10.0));
        assert!(slot.on);
        // Same frame id, newer snapshot.
        assert!(slot.flip_once(3, 12.5));
        assert!(!slot.on);
    }

    #[test]
    fn toggles_run_out_gracefully() {
        let mut state = PersistentState::new();
        for i in 0..MAX_TOGGLES as u32 {
            assert!(state.toggle(WidgetId::indexed("t", i)).is_some());
        }
        assert!(state.toggle(WidgetId::from_name("overflow")).is_none());
    }

    // ── timers ────────────────────────────────────────────────────────────

    #[test]
    fn timer_initializer_runs_only_once() {
        let mut state = PersistentState::new();
        let id = WidgetId::from_name("blinker");
        state.timer_or_insert_with(id, || AnimationTimer::new(300.0, 0.0));
        let t = state
            .timer_or_insert_with(id, || AnimationTimer::new(999.0, 0.0))
            .unwrap();
        assert_eq!(t.period_ms, 300.0);
    }

    // ── update counter ────────────────────────────────────────────────────

    #[test]
    fn update_counter_resets_per_frame() {
        let mut state = PersistentState::new();
        assert_eq!(state.count_update(1), 0);
        assert_eq!(state.count_update(1), 1);
        assert_eq!(state.count_update(1), 2);
        assert_eq!(state.count_update(2), 0);
    }

    #[test]
    fn reading_the_counter_leaves_it_alone() {
        let mut state = PersistentState::new();
        assert_eq!(state.updates_in_frame(1), 0);
        state.count_update(1);
        state.count_update(1);
        assert_eq!(state.updates_in_frame(1), 2);
        assert_eq!(state.updates_in_frame(1), 2);
        assert_eq!(state.updates_in_frame(2), 0);
    }

    #[test]
    fn reset_restores_layout_version() {
        let mut state = PersistentState::new();
        state.layout_version = 0;
        assert!(!state.is_compatible());
        state.reset();
        assert!(state.is_compatible());
    }
}
