//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (Winit keyboard
// events, gilrs gamepad events) into a unified, engine-friendly format
// used by the input subsystem.
//
// Event Flow:
// ```text
// Platform Layer (Winit / gilrs)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputManager (key set + gamepad snapshot)
//         ↓
//    Axes, facing angle, action flags
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyW` is always the same physical key on QWERTY and AZERTY layouts,
/// which is what movement bindings want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    /// Keys whose platform default (scrolling, focus changes) is swallowed
    /// while the world has focus.
    pub const CONTROL_KEYS: [KeyCode; 10] = [
        KeyCode::KeyW,
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::Space,
    ];

    pub fn is_control_key(self) -> bool {
        Self::CONTROL_KEYS.contains(&self)
    }
}

//=== Gamepad Identifiers =================================================

/// Analog axes in the standard gamepad layout.
///
/// Stick Y axes point down (pushing the stick toward the player is
/// positive), matching the standard web gamepad mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

impl GamepadAxis {
    pub const fn index(self) -> usize {
        match self {
            GamepadAxis::LeftStickX => 0,
            GamepadAxis::LeftStickY => 1,
            GamepadAxis::RightStickX => 2,
            GamepadAxis::RightStickY => 3,
        }
    }
}

/// Buttons in the standard gamepad layout, numbered like the web mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl GamepadButton {
    pub const COUNT: usize = 16;

    pub const fn index(self) -> usize {
        self as usize
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + payload, except `GamepadAxisMoved`, which
/// compares by axis only. That lets the platform buffer keep just the
/// latest value per axis within a frame.
///
/// ```text
/// KeyDown(A)              == KeyDown(A)               ✓
/// KeyDown(A)              == KeyUp(A)                 ✗
/// AxisMoved{LeftX, 0.3}   == AxisMoved{LeftX, 0.9}    ✓ (same axis)
/// AxisMoved{LeftX, 0.3}   == AxisMoved{LeftY, 0.3}    ✗
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),

    GamepadConnected,
    GamepadDisconnected,

    /// Stick moved; `value` in [-1, 1].
    GamepadAxisMoved { axis: GamepadAxis, value: f32 },

    GamepadButtonDown(GamepadButton),
    GamepadButtonUp(GamepadButton),

    /// Unrecognized or unsupported event; ignored by the input system.
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            (GamepadButtonDown(a), GamepadButtonDown(b))
            | (GamepadButtonUp(a), GamepadButtonUp(b)) => a == b,
            // Axis value ignored so the buffer coalesces per axis
            (GamepadAxisMoved { axis: a, .. }, GamepadAxisMoved { axis: b, .. }) => a == b,
            (GamepadConnected, GamepadConnected)
            | (GamepadDisconnected, GamepadDisconnected)
            | (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::GamepadButtonDown(button) | Self::GamepadButtonUp(button) => button.hash(state),
            Self::GamepadAxisMoved { axis, .. } => axis.hash(state),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn axis_events_coalesce_by_axis() {
        let mut set = HashSet::new();
        set.replace(InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value: 0.1 });
        set.replace(InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value: 0.8 });
        set.replace(InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickY, value: 0.8 });

        assert_eq!(set.len(), 2);
        let x = set
            .iter()
            .find_map(|event| match event {
                InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value } => Some(*value),
                _ => None,
            });
        assert_eq!(x, Some(0.8));
    }

    #[test]
    fn key_down_and_up_differ() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA));
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::KeyA));
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::KeyB));
    }

    #[test]
    fn control_keys_cover_movement() {
        for key in [KeyCode::KeyW, KeyCode::ArrowLeft, KeyCode::Space, KeyCode::KeyE] {
            assert!(key.is_control_key());
        }
        assert!(!KeyCode::Escape.is_control_key());
        assert!(!KeyCode::Digit1.is_control_key());
    }

    #[test]
    fn button_indices_follow_standard_layout() {
        assert_eq!(GamepadButton::South.index(), 0);
        assert_eq!(GamepadButton::East.index(), 1);
        assert_eq!(GamepadButton::DPadRight.index(), GamepadButton::COUNT - 1);
        assert_eq!(GamepadAxis::LeftStickY.index(), 1);
    }
}
