//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events and gilrs gamepad events into engine
// InputEvents.
//
// Architecture:
//   Winit KeyEvent   ─┐
//                     ├→ InputProcessor → InputEvent → InputBuffer
//   gilrs EventType  ─┘
//
// Key repeats and unmapped keys are filtered (None). Gamepad stick Y is
// flipped so that pushing the stick toward the player reads positive.
//
//=========================================================================

//=== External Dependencies ===============================================

use gilrs::{Axis, Button, EventType};
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{GamepadAxis, GamepadButton, InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Stateless translator from platform events to engine InputEvents.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };

        Self::key_input(KeyCode::from(code), key_event.state)
    }

    fn key_input(key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    //--- Gamepad ----------------------------------------------------------

    /// Converts a gilrs event (filters unmapped axes and buttons).
    pub(crate) fn process_gamepad_event(&self, event: &EventType) -> Option<InputEvent> {
        match *event {
            EventType::Connected => Some(InputEvent::GamepadConnected),
            EventType::Disconnected => Some(InputEvent::GamepadDisconnected),
            EventType::ButtonPressed(button, _) => map_button(button).map(InputEvent::GamepadButtonDown),
            EventType::ButtonReleased(button, _) => map_button(button).map(InputEvent::GamepadButtonUp),
            EventType::AxisChanged(axis, value, _) => {
                let (axis, value) = map_axis(axis, value)?;
                Some(InputEvent::GamepadAxisMoved { axis, value })
            }
            _ => None,
        }
    }
}

//=========================================================================
// Gilrs Conversions
//=========================================================================

fn map_axis(axis: Axis, value: f32) -> Option<(GamepadAxis, f32)> {
    match axis {
        Axis::LeftStickX => Some((GamepadAxis::LeftStickX, value)),
        Axis::LeftStickY => Some((GamepadAxis::LeftStickY, -value)),
        Axis::RightStickX => Some((GamepadAxis::RightStickX, value)),
        Axis::RightStickY => Some((GamepadAxis::RightStickY, -value)),
        _ => None,
    }
}

fn map_button(button: Button) -> Option<GamepadButton> {
    Some(match button {
        Button::South => GamepadButton::South,
        Button::East => GamepadButton::East,
        Button::West => GamepadButton::West,
        Button::North => GamepadButton::North,
        Button::LeftTrigger => GamepadButton::LeftBumper,
        Button::RightTrigger => GamepadButton::RightBumper,
        Button::LeftTrigger2 => GamepadButton::LeftTrigger,
        Button::RightTrigger2 => GamepadButton::RightTrigger,
        Button::Select => GamepadButton::Select,
        Button::Start => GamepadButton::Start,
        Button::LeftThumb => GamepadButton::LeftStick,
        Button::RightThumb => GamepadButton::RightStick,
        Button::DPadUp => GamepadButton::DPadUp,
        Button::DPadDown => GamepadButton::DPadDown,
        Button::DPadLeft => GamepadButton::DPadLeft,
        Button::DPadRight => GamepadButton::DPadRight,
        _ => return None,
    })
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Physical key → engine key. Anything outside the mapped set (function
/// keys, numpad, media keys) becomes `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Digits ---------------------------------------------------
            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            //--- Letters --------------------------------------------------
            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            //--- Navigation -----------------------------------------------
            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,
            W::Space => KeyCode::Space,
            W::Enter | W::NumpadEnter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
