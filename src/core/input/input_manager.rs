//=========================================================================
// Input Manager
//
// Turns tracked key and gamepad state into the values the avatar needs:
// two movement axes, a facing angle, and a handful of action flags.
//
// Responsibilities:
// - Prefer the gamepad's left stick when a pad is connected, otherwise
//   derive discrete -1/0/1 axes from WASD / arrow keys
// - Apply the analog dead zone
// - Latch the one-shot interaction flag on an `E` key-down edge
// - Report which keys belong to the control set so the platform layer
//   can swallow their default behavior
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{GamepadAxis, GamepadButton, InputEvent, KeyCode};
use super::state_tracker::{GamepadState, StateTracker};

//=== Constants ===========================================================

/// Default analog dead zone.
pub const DEFAULT_DEAD_ZONE: f32 = 0.2;

const ATTACK_BUTTON: GamepadButton = GamepadButton::South;
const JUMP_BUTTON: GamepadButton = GamepadButton::East;
const INTERACT_KEY: KeyCode = KeyCode::KeyE;

//=== Dead Zone ===========================================================

/// Values with `|v| < dead_zone` become exactly 0; others pass unchanged.
pub fn apply_dead_zone(value: f32, dead_zone: f32) -> f32 {
    if value.abs() < dead_zone {
        0.0
    } else {
        value
    }
}

//=== KeyDisposition ======================================================

/// Whether an event belongs to the game's control set.
///
/// Informational only: events reach the logic thread after the platform
/// has already handled them, so nothing here can suppress OS behavior.
/// Key state is tracked the same way for both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Movement, interaction or dialogue key.
    Consumed,
    /// Any other event.
    Ignored,
}

//=== InputManager ========================================================

pub struct InputManager {
    tracker: StateTracker,
    dead_zone: f32,
    interaction: bool,
}

impl InputManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_dead_zone(DEFAULT_DEAD_ZONE)
    }

    pub fn with_dead_zone(dead_zone: f32) -> Self {
        Self {
            tracker: StateTracker::new(),
            dead_zone: dead_zone.abs(),
            interaction: false,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Clears per-frame key edges. Call once before feeding a frame's events.
    pub fn begin_frame(&mut self) {
        self.tracker.clear();
    }

    /// Applies one event and reports whether it belongs to the control set.
    pub fn handle_event(&mut self, event: &InputEvent) -> KeyDisposition {
        let pressed = self.tracker.process_event(event);

        match *event {
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => {
                if pressed && key == INTERACT_KEY {
                    trace!(target: "input", "Interaction requested");
                    self.interaction = true;
                }

                if key.is_control_key() {
                    KeyDisposition::Consumed
                } else {
                    KeyDisposition::Ignored
                }
            }
            _ => KeyDisposition::Ignored,
        }
    }

    /// Applies every event of every batch, in order. Dispositions are
    /// dropped; see [`KeyDisposition`].
    pub fn process_batches(&mut self, batches: &[Vec<InputEvent>]) {
        for event in batches.iter().flatten() {
            self.handle_event(event);
        }
    }

    //--- Movement ---------------------------------------------------------

    /// Horizontal axis in [-1, 1]; right is positive.
    pub fn x(&self) -> f32 {
        if self.gamepad().is_connected() {
            return apply_dead_zone(self.gamepad().axis(GamepadAxis::LeftStickX), self.dead_zone);
        }
        self.key_axis(&[KeyCode::KeyD, KeyCode::ArrowRight], &[KeyCode::KeyA, KeyCode::ArrowLeft])
    }

    /// Depth axis in [-1, 1]; toward the viewer (back) is positive.
    pub fn z(&self) -> f32 {
        if self.gamepad().is_connected() {
            return apply_dead_zone(self.gamepad().axis(GamepadAxis::LeftStickY), self.dead_zone);
        }
        self.key_axis(&[KeyCode::KeyS, KeyCode::ArrowDown], &[KeyCode::KeyW, KeyCode::ArrowUp])
    }

    /// Facing derived from the input vector: `atan2(x, z)`.
    pub fn angle(&self) -> f32 {
        self.x().atan2(self.z())
    }

    pub fn is_moving(&self) -> bool {
        self.x() != 0.0 || self.z() != 0.0
    }

    //--- Actions ----------------------------------------------------------

    /// Gamepad button 0; no keyboard fallback.
    pub fn attack(&self) -> bool {
        self.gamepad().is_pressed(ATTACK_BUTTON)
    }

    /// Gamepad button 1; no keyboard fallback.
    pub fn jump(&self) -> bool {
        self.gamepad().is_pressed(JUMP_BUTTON)
    }

    /// One-shot interaction flag. Stays set until cleared.
    pub fn interaction(&self) -> bool {
        self.interaction
    }

    /// Reads and clears the interaction flag.
    pub fn take_interaction(&mut self) -> bool {
        std::mem::take(&mut self.interaction)
    }

    pub fn clear_interaction(&mut self) {
        self.interaction = false;
    }

    //--- Raw Queries ------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.tracker.is_key_down(key)
    }

    /// Key went down this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.tracker.is_key_pressed(key)
    }

    pub fn gamepad(&self) -> &GamepadState {
        self.tracker.gamepad()
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_axis(&self, positive: &[KeyCode], negative: &[KeyCode]) -> f32 {
        let held = |keys: &[KeyCode]| keys.iter().any(|&key| self.tracker.is_key_down(key));
        match (held(positive), held(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

//=== Debug Trait ==========================================================
//
// Prints derived values rather than the raw key set.
//
// ```text
// InputManager { x: 1.0, z: 0.0, moving: true, interaction: false, gamepad: false }
// ```
//
impl fmt::Debug for InputManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputManager")
            .field("x", &self.x())
            .field("z", &self.z())
            .field("moving", &self.is_moving())
            .field("interaction", &self.interaction)
            .field("gamepad", &self.gamepad().is_connected())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn with_events(events: &[InputEvent]) -> InputManager {
        let mut input = InputManager::new();
        input.begin_frame();
        input.process_batches(&[events.to_vec()]);
        input
    }

    fn stick(x: f32, z: f32) -> InputManager {
        with_events(&[
            InputEvent::GamepadConnected,
            InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value: x },
            InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickY, value: z },
        ])
    }

    //--- Dead Zone --------------------------------------------------------

    #[test]
    fn values_inside_dead_zone_are_exactly_zero() {
        for raw in [0.0, 0.05, -0.1, 0.199, -0.199] {
            assert_eq!(apply_dead_zone(raw, DEFAULT_DEAD_ZONE), 0.0, "raw {raw}");
        }
    }

    #[test]
    fn values_outside_dead_zone_pass_unchanged() {
        for raw in [0.2, -0.2, 0.35, -0.75, 1.0, -1.0] {
            assert_eq!(apply_dead_zone(raw, DEFAULT_DEAD_ZONE), raw, "raw {raw}");
        }
    }

    #[test]
    fn gamepad_axes_use_dead_zone() {
        let input = stick(0.1, -0.6);
        assert_eq!(input.x(), 0.0);
        assert_eq!(input.z(), -0.6);
        assert!(input.is_moving());
    }

    #[test]
    fn drifting_stick_is_not_moving() {
        let input = stick(0.15, -0.19);
        assert!(!input.is_moving());
    }

    //--- Keyboard ---------------------------------------------------------

    #[test]
    fn keyboard_axes_are_discrete() {
        let input = with_events(&[InputEvent::KeyDown(KeyCode::KeyD), InputEvent::KeyDown(KeyCode::KeyW)]);
        assert_eq!(input.x(), 1.0);
        assert_eq!(input.z(), -1.0);

        let input = with_events(&[InputEvent::KeyDown(KeyCode::ArrowLeft), InputEvent::KeyDown(KeyCode::ArrowDown)]);
        assert_eq!(input.x(), -1.0);
        assert_eq!(input.z(), 1.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let input = with_events(&[InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::KeyD)]);
        assert_eq!(input.x(), 0.0);
        assert!(!input.is_moving());
    }

    #[test]
    fn connected_gamepad_overrides_keyboard() {
        let input = with_events(&[
            InputEvent::KeyDown(KeyCode::KeyD),
            InputEvent::GamepadConnected,
        ]);
        assert_eq!(input.x(), 0.0);
    }

    //--- Angle ------------------------------------------------------------

    #[test]
    fn angle_is_atan2_of_x_and_z() {
        let input = stick(0.5, 0.0);
        assert!((input.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let input = stick(0.0, 0.8);
        assert_eq!(input.angle(), 0.0);

        let input = stick(-0.7, -0.7);
        assert!((input.angle() - (-0.7f32).atan2(-0.7)).abs() < 1e-6);
    }

    //--- Actions ----------------------------------------------------------

    #[test]
    fn attack_and_jump_read_gamepad_buttons_only() {
        let input = with_events(&[InputEvent::KeyDown(KeyCode::Space)]);
        assert!(!input.attack());
        assert!(!input.jump());

        let input = with_events(&[
            InputEvent::GamepadButtonDown(GamepadButton::South),
            InputEvent::GamepadButtonDown(GamepadButton::East),
        ]);
        assert!(input.attack());
        assert!(input.jump());
    }

    #[test]
    fn interaction_is_one_shot() {
        let mut input = with_events(&[InputEvent::KeyDown(KeyCode::KeyE)]);
        assert!(input.interaction());

        // Holding the key across frames does not re-arm the flag.
        input.begin_frame();
        assert!(input.take_interaction());
        input.handle_event(&InputEvent::KeyDown(KeyCode::KeyE));
        assert!(!input.interaction());

        input.handle_event(&InputEvent::KeyUp(KeyCode::KeyE));
        input.handle_event(&InputEvent::KeyDown(KeyCode::KeyE));
        assert!(input.interaction());
        input.clear_interaction();
        assert!(!input.interaction());
    }

    //--- Dispositions -----------------------------------------------------

    #[test]
    fn control_keys_are_consumed() {
        let mut input = InputManager::new();
        assert_eq!(input.handle_event(&InputEvent::KeyDown(KeyCode::ArrowUp)), KeyDisposition::Consumed);
        assert_eq!(input.handle_event(&InputEvent::KeyUp(KeyCode::Space)), KeyDisposition::Consumed);
        assert_eq!(input.handle_event(&InputEvent::KeyDown(KeyCode::Escape)), KeyDisposition::Ignored);
        assert_eq!(input.handle_event(&InputEvent::GamepadConnected), KeyDisposition::Ignored);
    }

    #[test]
    fn ignored_keys_are_still_tracked() {
        let mut input = InputManager::new();
        input.process_batches(&[vec![
            InputEvent::KeyDown(KeyCode::Escape),
            InputEvent::KeyDown(KeyCode::ArrowUp),
        ]]);

        assert!(input.is_key_pressed(KeyCode::Escape));
        assert!(input.is_key_down(KeyCode::ArrowUp));
    }
}
