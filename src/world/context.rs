//=========================================================================
// Game Context
//=========================================================================
//
// Shared services handed to every world object that needs them.
//
// One `GameContext` is built by the composition root and passed down by
// `&mut`. There is no process-wide instance: two games in one process
// (tests do this) never see each other's state.
//
// Architecture:
//   GameContext
//     ├─ states     GameStateManager   (mode FSM)
//     ├─ input      InputManager       (polled per frame)
//     ├─ audio      SoundManager       (banks + voices)
//     ├─ dialogue   DialogueManager    (single session)
//     ├─ physics    Box<dyn PhysicsWorld>
//     ├─ scene      Box<dyn SceneGraph>
//     ├─ hud        Hud
//     └─ pending_view                  (overlay the next camera pan lands in)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::dialogue::DialogueManager;
use super::overlay::Hud;
use crate::config::GameConfig;
use crate::core::assets::{AssetLoader, StaticAssets};
use crate::core::audio::{AudioBackend, SilentAudio, SoundManager};
use crate::core::input::InputManager;
use crate::core::physics::{FlatWorld, PhysicsWorld};
use crate::core::scene_graph::{HeadlessScene, SceneGraph};
use crate::core::state::{GameState, GameStateManager, TransitionTable, ViewKind};

//=== Backends ============================================================

/// Host collaborators the game runs against.
pub struct Backends {
    pub physics: Box<dyn PhysicsWorld>,
    pub scene: Box<dyn SceneGraph>,
    pub audio: Box<dyn AudioBackend>,
    pub assets: Box<dyn AssetLoader>,
}

impl Backends {
    /// Reference world, recording scene, silent audio, no assets.
    pub fn headless() -> Self {
        Self {
            physics: Box::new(FlatWorld::new()),
            scene: Box::new(HeadlessScene::new()),
            audio: Box::new(SilentAudio::default()),
            assets: Box::new(StaticAssets::new()),
        }
    }
}

//=== Transition Policy ===================================================

/// Standard table plus the edges the full game flow needs: finishing a
/// load, unpausing, leaving overlays opened from the start screen, and
/// coming back from a reset.
pub fn game_transition_table() -> TransitionTable {
    use GameState::*;

    TransitionTable::standard()
        .allow(Loading, &[Playing])
        .allow(Paused, &[Playing])
        .allow(PortfolioView, &[GameStartScreen])
        .allow(EducationView, &[GameStartScreen])
        .allow(GameReset, &[GameStartScreen])
}

//=== GameContext =========================================================

pub struct GameContext {
    pub config: GameConfig,
    pub states: GameStateManager,
    pub input: InputManager,
    pub audio: SoundManager,
    pub dialogue: DialogueManager,
    pub physics: Box<dyn PhysicsWorld>,
    pub scene: Box<dyn SceneGraph>,
    pub hud: Hud,
    pub pending_view: ViewKind,
}

impl GameContext {
    /// Wires every service. The asset loader stays with the caller.
    pub fn new(
        config: GameConfig,
        states: GameStateManager,
        physics: Box<dyn PhysicsWorld>,
        scene: Box<dyn SceneGraph>,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        let mut states = states;
        let dialogue = DialogueManager::new(&config.dialogue, &mut states);

        Self {
            input: InputManager::with_dead_zone(config.input.dead_zone),
            audio: SoundManager::new(audio),
            dialogue,
            physics,
            scene,
            hud: Hud::default(),
            pending_view: ViewKind::default(),
            states,
            config,
        }
    }

    /// Context over headless collaborators with the full game table.
    pub fn headless(config: GameConfig) -> Self {
        let Backends { physics, scene, audio, .. } = Backends::headless();
        Self::new(
            config,
            GameStateManager::with_table(game_transition_table()),
            physics,
            scene,
            audio,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_table_extends_standard() {
        let standard = TransitionTable::standard();
        let game = game_transition_table();

        for from in GameState::ALL {
            for to in GameState::ALL {
                if standard.contains(from, to) {
                    assert!(game.contains(from, to), "{from} -> {to} dropped");
                }
            }
        }
        assert!(!standard.contains(GameState::Loading, GameState::Playing));
        assert!(game.contains(GameState::Loading, GameState::Playing));
    }

    #[test]
    fn contexts_are_independent() {
        let mut a = GameContext::headless(GameConfig::default());
        let b = GameContext::headless(GameConfig::default());

        assert!(a.states.set_state(GameState::Loading));
        assert_eq!(b.states.current(), GameState::GameStartScreen);
    }
}
