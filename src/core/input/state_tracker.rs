//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_event() → key set / gamepad snapshot → query
//
// Frame lifecycle: clear() → process_event()* → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{GamepadAxis, GamepadButton, InputEvent, KeyCode};

//=== GamepadState ========================================================

/// Snapshot of the first connected gamepad.
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadState {
    connected: bool,
    axes: [f32; 4],
    buttons: [bool; GamepadButton::COUNT],
}

impl GamepadState {
    pub fn new() -> Self {
        Self {
            connected: false,
            axes: [0.0; 4],
            buttons: [false; GamepadButton::COUNT],
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Raw axis value, before any dead zone.
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.buttons[button.index()]
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::new()
    }
}

//=== StateTracker ========================================================

/// Tracks persistent state (keys held, gamepad snapshot) and per-frame
/// deltas (keys pressed/released this frame).
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    gamepad: GamepadState,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            gamepad: GamepadState::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(super) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Applies one event. Returns `true` if a key went up → down.
    pub(super) fn process_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown(key) => {
                // Only mark as pressed if it wasn't already down (key repeat)
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                    return true;
                }
            }

            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
            }

            InputEvent::GamepadConnected => {
                self.gamepad.connected = true;
            }

            InputEvent::GamepadDisconnected => {
                self.gamepad.reset();
            }

            InputEvent::GamepadAxisMoved { axis, value } => {
                self.gamepad.connected = true;
                self.gamepad.axes[axis.index()] = value.clamp(-1.0, 1.0);
            }

            InputEvent::GamepadButtonDown(button) => {
                self.gamepad.connected = true;
                self.gamepad.buttons[button.index()] = true;
            }

            InputEvent::GamepadButtonUp(button) => {
                self.gamepad.buttons[button.index()] = false;
            }

            InputEvent::Unidentified => {}
        }

        false
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    //=====================================================================
    // Query API - Gamepad
    //=====================================================================

    pub fn gamepad(&self) -> &GamepadState {
        &self.gamepad
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        for event in events {
            tracker.process_event(event);
        }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[InputEvent::KeyDown(KeyCode::KeyA)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[InputEvent::KeyUp(KeyCode::KeyA)]);
        assert!(!tracker.is_key_down(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut tracker = StateTracker::new();
        assert!(tracker.process_event(&InputEvent::KeyDown(KeyCode::KeyE)));
        tracker.clear();
        assert!(!tracker.process_event(&InputEvent::KeyDown(KeyCode::KeyE)));
        assert!(!tracker.is_key_pressed(KeyCode::KeyE));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::KeyUp(KeyCode::KeyW)]);
        assert!(!tracker.is_key_released(KeyCode::KeyW));
    }

    //=====================================================================
    // Gamepad Tests
    //=====================================================================

    #[test]
    fn axis_event_marks_gamepad_connected() {
        let mut tracker = StateTracker::new();
        assert!(!tracker.gamepad().is_connected());

        frame(
            &mut tracker,
            &[InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value: 0.5 }],
        );
        assert!(tracker.gamepad().is_connected());
        assert_eq!(tracker.gamepad().axis(GamepadAxis::LeftStickX), 0.5);
    }

    #[test]
    fn axis_values_are_clamped() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickY, value: 1.7 }],
        );
        assert_eq!(tracker.gamepad().axis(GamepadAxis::LeftStickY), 1.0);
    }

    #[test]
    fn disconnect_resets_snapshot() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[
                InputEvent::GamepadConnected,
                InputEvent::GamepadButtonDown(GamepadButton::South),
                InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value: -0.9 },
            ],
        );
        assert!(tracker.gamepad().is_pressed(GamepadButton::South));

        frame(&mut tracker, &[InputEvent::GamepadDisconnected]);
        assert!(!tracker.gamepad().is_connected());
        assert!(!tracker.gamepad().is_pressed(GamepadButton::South));
        assert_eq!(tracker.gamepad().axis(GamepadAxis::LeftStickX), 0.0);
    }
}
