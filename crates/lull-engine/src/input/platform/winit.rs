use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent, TextEvent, WheelDelta,
};

/// Translates a winit `WindowEvent` into zero or more engine `InputEvent`s.
///
/// Positions stay in physical pixels: the UI lays out in framebuffer space.
/// A key press that produces text yields both a `Key` and a `Text` event.
pub(crate) fn translate_window_event(event: &WindowEvent, emit: &mut dyn FnMut(InputEvent)) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            emit(InputEvent::ModifiersChanged(map_modifiers(m.state())));
        }

        WindowEvent::Focused(f) => emit(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => emit(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            emit(InputEvent::PointerMoved(PointerMoveEvent {
                x: position.x as f32,
                y: position.y as f32,
            }));
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let state = match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            emit(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state,
            }));
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines(*y),
                MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixels(p.y as f32),
            };
            emit(InputEvent::Wheel(delta));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            emit(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            });

            if state == KeyState::Pressed {
                if let Some(text) = event.text.as_ref().filter(|t| !t.is_empty()) {
                    emit(InputEvent::Text(TextEvent { text: text.to_string() }));
                }
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
            emit(InputEvent::Text(TextEvent { text: text.clone() }));
        }

        _ => {}
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Space => Key::Space,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            other => Key::Other(other as u32),
        },
        // NativeKeyCode carries no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Other(0),
    }
}
