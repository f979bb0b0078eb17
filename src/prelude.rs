//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use wayfarer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::world::{Backends, Game, GameContext};

// State machine
pub use crate::core::state::{GameState, GameStateManager, Phase, StateChangeEvent, ViewKind};

// Input
pub use crate::core::input::{GamepadAxis, GamepadButton, InputEvent, InputManager, KeyCode};

// Collaborator seams
pub use crate::core::assets::{AssetLoader, StaticAssets};
pub use crate::core::audio::{AudioBackend, SilentAudio, SoundManager};
pub use crate::core::physics::{FlatWorld, PhysicsWorld};
pub use crate::core::scene_graph::{HeadlessScene, SceneGraph};

// Gameplay
pub use crate::world::{DialogueEntry, DialogueManager, Interactive, Npc, Player};
