//=========================================================================
// Input System
//=========================================================================
//
// Keyboard and gamepad input for the avatar and UI commands.
//
// Architecture:
//   PlatformEvent::Inputs → InputManager::process_batches()
//     → StateTracker (keys held / pressed this frame, gamepad snapshot)
//     → axes, angle, action flags, one-shot interaction
//
// Frame lifecycle: begin_frame() → process_batches() → query
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod input_manager;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{GamepadAxis, GamepadButton, InputEvent, KeyCode};
pub use input_manager::{apply_dead_zone, InputManager, KeyDisposition, DEFAULT_DEAD_ZONE};
pub use state_tracker::{GamepadState, StateTracker};
