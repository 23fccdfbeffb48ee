use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent, WheelDelta,
};

/// Pixels of touchpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Pointer position in framebuffer pixels; `None` while outside.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
    /// Absolute wheel position in notches.
    pub wheel: i32,
    wheel_remainder: f32,
}

impl InputState {
    /// Applies an event to the held state and records the change in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered after focus loss.
                    for b in self.buttons_down.drain() {
                        frame.buttons_released.insert(b);
                    }
                    for k in self.keys_down.drain() {
                        frame.keys_released.insert(k);
                    }
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state }) => match state {
                MouseButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                MouseButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },

            InputEvent::Wheel(delta) => {
                let notches = match *delta {
                    WheelDelta::Lines(y) => y,
                    WheelDelta::Pixels(y) => y / PIXELS_PER_NOTCH,
                } + self.wheel_remainder;
                let whole = notches.trunc();
                self.wheel_remainder = notches - whole;
                let whole = whole as i32;
                self.wheel = self.wheel.wrapping_add(whole);
                frame.wheel_delta = frame.wheel_delta.wrapping_add(whole);
            }

            InputEvent::Text(t) => frame.text.push(t.clone()),
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button, state })
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_in_one_frame_records_both_edges() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Pressed));
        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Released));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Released));
        assert!(frame.buttons_released.is_empty());
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn pixel_scroll_accumulates_into_notches() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Wheel(WheelDelta::Pixels(30.0)));
        assert_eq!(frame.wheel_delta, 0);
        state.apply_event(&mut frame, InputEvent::Wheel(WheelDelta::Pixels(30.0)));
        assert_eq!(frame.wheel_delta, 1);
        assert_eq!(state.wheel, 1);
    }

    #[test]
    fn line_scroll_is_signed() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Wheel(WheelDelta::Lines(-2.0)));
        assert_eq!(frame.wheel_delta, -2);
        assert_eq!(state.wheel, -2);
    }
}
