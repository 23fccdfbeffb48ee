use lull_api::{DigitalButton, Inputs, Int2, Mouse};

use super::frame::InputFrame;
use super::state::InputState;
use super::types::MouseButton;

/// Builds the per-iteration `Inputs` value from runtime input state.
///
/// Remembers the previously reported pointer and wheel so deltas are
/// relative to what the module last saw, not to the last OS event.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    last_position: Int2,
    last_wheel: i32,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        &mut self,
        frame_ms: f64,
        frame_id: u64,
        state: &InputState,
        frame: &InputFrame,
    ) -> Inputs {
        let position = state
            .pointer_pos
            .map(|(x, y)| Int2::new(x.round() as i32, y.round() as i32))
            .unwrap_or(self.last_position);

        let mouse = Mouse {
            left: digital(state, frame, MouseButton::Left),
            right: digital(state, frame, MouseButton::Right),
            wheel: state.wheel,
            delta_wheel: state.wheel.wrapping_sub(self.last_wheel),
            position,
            delta_position: position - self.last_position,
        };

        self.last_position = position;
        self.last_wheel = state.wheel;

        let mut inputs = Inputs::new(frame_ms, frame_id, mouse);
        for t in &frame.text {
            if !inputs.push_text(&t.text) {
                log::debug!("text input truncated to {} bytes", lull_api::TEXT_CAPACITY);
                break;
            }
        }
        inputs
    }
}

fn digital(state: &InputState, frame: &InputFrame, button: MouseButton) -> DigitalButton {
    DigitalButton {
        down: state.button_down(button),
        pressed: frame.buttons_pressed.contains(&button),
        released: frame.buttons_released.contains(&button),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        InputEvent, MouseButtonState, PointerButtonEvent, PointerMoveEvent, TextEvent,
    };

    fn feed(state: &mut InputState, frame: &mut InputFrame, ev: InputEvent) {
        state.apply_event(frame, ev);
    }

    #[test]
    fn pointer_delta_is_relative_to_previous_snapshot() {
        let mut builder = SnapshotBuilder::new();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        feed(&mut state, &mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 }));
        let a = builder.build(0.0, 0, &state, &frame);
        assert_eq!(a.mouse.position, Int2::new(10, 20));
        assert_eq!(a.mouse.delta_position, Int2::new(10, 20));

        frame.clear();
        feed(&mut state, &mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 15.0, y: 18.0 }));
        feed(&mut state, &mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 16.0, y: 18.0 }));
        let b = builder.build(1.0, 1, &state, &frame);
        assert_eq!(b.mouse.delta_position, Int2::new(6, -2));
    }

    #[test]
    fn pointer_outside_keeps_last_position() {
        let mut builder = SnapshotBuilder::new();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        feed(&mut state, &mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 5.0 }));
        builder.build(0.0, 0, &state, &frame);
        frame.clear();
        feed(&mut state, &mut frame, InputEvent::PointerLeft);
        let s = builder.build(1.0, 0, &state, &frame);
        assert_eq!(s.mouse.position, Int2::new(5, 5));
        assert_eq!(s.mouse.delta_position, Int2::ZERO);
    }

    #[test]
    fn left_button_edges_and_text_are_captured() {
        let mut builder = SnapshotBuilder::new();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        feed(
            &mut state,
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
            }),
        );
        feed(&mut state, &mut frame, InputEvent::Text(TextEvent { text: "d".into() }));
        let s = builder.build(3.5, 7, &state, &frame);
        assert!(s.mouse.left.down && s.mouse.left.pressed && !s.mouse.left.released);
        assert!(!s.mouse.right.transitioned());
        assert_eq!(s.text(), "d");
        assert_eq!(s.frame_id, 7);
        assert_eq!(s.frame_ms, 3.5);
    }
}
