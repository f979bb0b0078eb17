//=========================================================================
// Game
//=========================================================================
//
// Composition root: builds the context, owns every world object and runs
// the frame.
//
// Frame order (`update`):
//   1. UI commands        start screen / overlay close / dialogue continue
//   2. inboxes            overlays, bootstrap, music, dialogue, loading
//   3. NPCs               idle animation
//   4. player             interaction, velocity, animation, fade
//   5. physics.step()     exactly once
//   6. player sync        body → transform, facing
//   7. camera             follow or pan
//   8. light              follow player
//
// Entering Loading loads every configured model, spawns whatever loaded,
// then moves on to Playing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::camera::CameraController;
use super::context::{game_transition_table, Backends, GameContext};
use super::light::FollowLight;
use super::npc::Npc;
use super::overlay::{LoadingScreen, OverlayPanel, StartScreen};
use super::player::Player;
use crate::config::GameConfig;
use crate::core::assets::{load_models, AssetLoader};
use crate::core::audio::MusicManager;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::state::{GameState, GameStateManager, Phase, StateInbox, ViewKind};

//=== Key Bindings ========================================================

const START_KEY: KeyCode = KeyCode::Enter;
const PORTFOLIO_KEY: KeyCode = KeyCode::Digit1;
const EDUCATION_KEY: KeyCode = KeyCode::Digit2;
const CLOSE_KEY: KeyCode = KeyCode::Escape;
const CONTINUE_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::Enter];

//=== Game ================================================================

pub struct Game {
    ctx: GameContext,
    assets: Box<dyn AssetLoader>,

    //--- Subsystems ------------------------------------------------------
    music: MusicManager,
    camera: CameraController,
    loading_inbox: StateInbox,

    //--- Overlays --------------------------------------------------------
    start_screen: StartScreen,
    loading_screen: LoadingScreen,
    portfolio: OverlayPanel,
    education: OverlayPanel,

    //--- Entities --------------------------------------------------------
    player: Option<Player>,
    npcs: Vec<Rc<RefCell<Npc>>>,
    light: Option<FollowLight>,
}

impl Game {
    //--- Construction -----------------------------------------------------

    pub fn new(config: GameConfig, backends: Backends) -> Self {
        let Backends { physics, scene, audio, assets } = backends;

        let mut states = GameStateManager::with_table(game_transition_table());
        let music = MusicManager::new(&config.music, &mut states);
        let camera = CameraController::new(&config.camera, &mut states, config.player.start_position());
        let loading_inbox = states.subscribe(Phase::Enter, &[GameState::Loading]);
        let start_screen = StartScreen::new(&mut states);
        let portfolio = OverlayPanel::new(ViewKind::Portfolio, &mut states);
        let education = OverlayPanel::new(ViewKind::Education, &mut states);

        let ctx = GameContext::new(config, states, physics, scene, audio);

        info!(target: "game", "Game created in {}", ctx.states.current());

        Self {
            ctx,
            assets,
            music,
            camera,
            loading_inbox,
            start_screen,
            loading_screen: LoadingScreen::new(),
            portfolio,
            education,
            player: None,
            npcs: Vec::new(),
            light: None,
        }
    }

    //--- Input ------------------------------------------------------------

    /// Feeds one frame of platform input. Call before `update`.
    pub fn handle_input(&mut self, batches: &[Vec<InputEvent>]) {
        self.ctx.input.begin_frame();
        self.ctx.input.process_batches(batches);
    }

    //--- Frame ------------------------------------------------------------

    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        self.apply_ui_commands();
        self.drain_inboxes(dt);

        for npc in &self.npcs {
            npc.borrow_mut().update(dt);
        }

        if let Some(player) = self.player.as_mut() {
            player.update(dt, &mut self.ctx);
        }
        // An unconsumed E press must not carry into a later frame.
        self.ctx.input.clear_interaction();

        self.ctx.physics.step();

        if let Some(player) = self.player.as_mut() {
            player.after_physics_step(dt, &mut self.ctx);
        }

        let focus = self.focus();
        self.camera.update(dt, focus, &mut self.ctx);

        if let Some(light) = self.light.as_mut() {
            light.update(focus, self.ctx.scene.as_mut());
        }
    }

    //--- Commands ---------------------------------------------------------

    /// Start button: GameStartScreen → Loading.
    pub fn start(&mut self) -> bool {
        self.start_screen.start(&mut self.ctx.states)
    }

    /// Direct access from the start screen to an overlay.
    pub fn open_view(&mut self, view: ViewKind) -> bool {
        self.start_screen.open_view(view, &mut self.ctx.states)
    }

    /// Close button of whichever overlay is current.
    pub fn close_overlay(&mut self) -> bool {
        match self.ctx.states.current() {
            GameState::PortfolioView => self.portfolio.close(&mut self.ctx.states),
            GameState::EducationView => self.education.close(&mut self.ctx.states),
            _ => false,
        }
    }

    pub fn continue_dialogue(&mut self) {
        let ctx = &mut self.ctx;
        ctx.dialogue.handle_continue(&mut ctx.audio, &mut ctx.states);
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.ctx.states.current()
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn npcs(&self) -> &[Rc<RefCell<Npc>>] {
        &self.npcs
    }

    pub fn npc(&self, name: &str) -> Option<Rc<RefCell<Npc>>> {
        self.npcs.iter().find(|npc| npc.borrow().name() == name).cloned()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn music(&self) -> &MusicManager {
        &self.music
    }

    pub fn light(&self) -> Option<&FollowLight> {
        self.light.as_ref()
    }

    pub fn start_screen(&self) -> &StartScreen {
        &self.start_screen
    }

    pub fn loading_screen(&self) -> &LoadingScreen {
        &self.loading_screen
    }

    pub fn panel(&self, view: ViewKind) -> &OverlayPanel {
        match view {
            ViewKind::Portfolio => &self.portfolio,
            ViewKind::Education => &self.education,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn focus(&self) -> Vec3 {
        self.player
            .as_ref()
            .map_or_else(|| self.ctx.config.player.start_position(), Player::position)
    }

    fn pressed(&self, key: KeyCode) -> bool {
        self.ctx.input.is_key_pressed(key)
    }

    fn apply_ui_commands(&mut self) {
        match self.ctx.states.current() {
            GameState::GameStartScreen => {
                if self.pressed(START_KEY) {
                    self.start();
                } else if self.pressed(PORTFOLIO_KEY) {
                    self.open_view(ViewKind::Portfolio);
                } else if self.pressed(EDUCATION_KEY) {
                    self.open_view(ViewKind::Education);
                }
            }
            GameState::PortfolioView | GameState::EducationView => {
                if self.pressed(CLOSE_KEY) {
                    self.close_overlay();
                }
            }
            GameState::Dialogue => {
                if CONTINUE_KEYS.iter().any(|key| self.pressed(*key)) {
                    self.continue_dialogue();
                }
            }
            _ => {}
        }
    }

    fn drain_inboxes(&mut self, dt: f32) {
        self.start_screen.update(&mut self.ctx.states);
        self.portfolio.update();
        self.education.update();

        if self.loading_inbox.drain().count() > 0 {
            self.bootstrap();
        }

        let ctx = &mut self.ctx;
        self.music.update(dt, &mut ctx.audio);
        ctx.dialogue.update(dt, &mut ctx.audio);
        self.loading_screen.update(dt);
    }

    //--- Bootstrap --------------------------------------------------------

    /// Loads models, spawns the world and hands over to Playing.
    fn bootstrap(&mut self) {
        self.despawn_world();
        self.loading_screen.show();

        let player_config = self.ctx.config.player.clone();
        let npc_configs = self.ctx.config.npcs.clone();

        let paths: Vec<&str> = std::iter::once(player_config.model.as_str())
            .chain(npc_configs.iter().map(|npc| npc.model.as_str()))
            .collect();

        let loading_screen = &mut self.loading_screen;
        let cache = load_models(self.assets.as_mut(), &paths, |progress| {
            loading_screen.set_progress(progress);
        });

        let mut player = match cache.get(&player_config.model) {
            Some(model) => Some(Player::spawn(&player_config, &model.clips, &mut self.ctx)),
            None => {
                warn!(target: "game", "Player model missing, world starts without an avatar");
                None
            }
        };

        for config in &npc_configs {
            let Some(model) = cache.get(&config.model) else {
                warn!(target: "game", "Model for NPC '{}' missing, skipped", config.name);
                continue;
            };

            let npc = Rc::new(RefCell::new(Npc::spawn(config, &model.clips, &mut self.ctx)));
            if let Some(player) = player.as_mut() {
                player.add_interactable(npc.clone());
            }
            self.npcs.push(npc);
        }

        let focus = player
            .as_ref()
            .map_or_else(|| player_config.start_position(), Player::position);
        let offset = Vec3::from_array(self.ctx.config.light.follow_offset);
        self.light = Some(FollowLight::new(self.ctx.scene.as_mut(), offset, focus));
        self.player = player;

        info!(target: "game", "World ready: {} NPC(s)", self.npcs.len());
        self.ctx.states.set_state(GameState::Playing);
    }

    fn despawn_world(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.destroy(&mut self.ctx);
        }
        for npc in self.npcs.drain(..) {
            npc.borrow_mut().destroy(&mut self.ctx);
        }
        if let Some(light) = self.light.take() {
            self.ctx.scene.remove(light.node());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
