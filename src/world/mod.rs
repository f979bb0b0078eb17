//=========================================================================
// World
//=========================================================================
//
// Gameplay layer built on the core services.
//
// Architecture:
//   Game (composition root)
//     ├─ GameContext        states, input, audio, dialogue, physics, scene
//     ├─ Player             input → body → transform → animation → audio
//     ├─ Npc[]              Interactive, opens dialogue
//     ├─ CameraController   follow / pan via Tween
//     ├─ overlays           StartScreen, LoadingScreen, OverlayPanel, Hud
//     └─ FollowLight
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod context;
pub mod dialogue;
pub mod fade;
pub mod interactive;
pub mod light;
pub mod npc;
pub mod overlay;
pub mod player;
pub mod tween;

mod game;

//=== Public API ==========================================================

pub use camera::CameraController;
pub use context::{game_transition_table, Backends, GameContext};
pub use dialogue::{DialogueEntry, DialogueManager, DialoguePhase, DialogueSpeaker, DialogueSurface};
pub use fade::FadeIn;
pub use game::Game;
pub use interactive::{nearest_in_range, Interactive, SharedInteractive};
pub use light::FollowLight;
pub use npc::Npc;
pub use overlay::{Hud, LoadingScreen, OverlayPanel, StartScreen};
pub use player::Player;
pub use tween::{Easing, Tween};
