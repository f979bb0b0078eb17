//=========================================================================
// Overlays
//=========================================================================
//
// Screen-space UI state. Rendering belongs to the host; these types only
// track visibility and content, follow state events through inboxes and
// request transitions in response to user commands.
//
//   StartScreen    Enter(GameStartScreen) → shown
//                  Enter(GameReset)       → back to GameStartScreen
//   LoadingScreen  shown while loading, hidden 500 ms after 100 %
//   OverlayPanel   Enter(view) → shown, Exit(view) → hidden
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::{clamp_percent, LoadingProgress};
use crate::core::state::{GameState, GameStateManager, Phase, StateInbox, ViewKind};
use crate::core::timer::TimerSlot;

//=== Hud =================================================================

/// In-world prompt layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    prompt_visible: bool,
}

impl Hud {
    pub fn set_prompt_visible(&mut self, visible: bool) {
        self.prompt_visible = visible;
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.prompt_visible
    }
}

//=== StartScreen =========================================================

pub struct StartScreen {
    enter_inbox: StateInbox,
    visible: bool,
}

impl StartScreen {
    pub fn new(states: &mut GameStateManager) -> Self {
        Self {
            enter_inbox: states.subscribe(Phase::Enter, &[GameState::GameStartScreen, GameState::GameReset]),
            visible: states.is(GameState::GameStartScreen),
        }
    }

    pub fn update(&mut self, states: &mut GameStateManager) {
        let entered: Vec<GameState> = self.enter_inbox.drain().map(|event| event.new_state).collect();
        for state in entered {
            match state {
                GameState::GameStartScreen => self.visible = true,
                GameState::GameReset => {
                    debug!(target: "ui", "Game reset, returning to start screen");
                    states.set_state(GameState::GameStartScreen);
                }
                _ => {}
            }
        }
    }

    /// Begins loading the world.
    pub fn start(&mut self, states: &mut GameStateManager) -> bool {
        self.leave_to(GameState::Loading, states)
    }

    /// Opens an overlay straight from the start screen.
    pub fn open_view(&mut self, view: ViewKind, states: &mut GameStateManager) -> bool {
        self.leave_to(view.state(), states)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn leave_to(&mut self, target: GameState, states: &mut GameStateManager) -> bool {
        let accepted = states.set_state(target);
        if accepted {
            self.visible = false;
        }
        accepted
    }
}

//=== LoadingScreen =======================================================

#[derive(Debug, Default)]
pub struct LoadingScreen {
    visible: bool,
    percent: f32,
    hide_timer: TimerSlot,
}

impl LoadingScreen {
    pub const HIDE_DELAY: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.percent = 0.0;
        self.hide_timer.cancel();
    }

    /// Mirrors `progress`; schedules the hide once everything is done.
    pub fn set_progress(&mut self, progress: &LoadingProgress) {
        self.percent = clamp_percent(progress.percent());
        if progress.is_complete() && !self.hide_timer.is_live() {
            info!(target: "ui", "Loading complete");
            self.hide_timer.start(Self::HIDE_DELAY);
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.hide_timer.tick(dt) > 0 {
            self.hide_timer.cancel();
            self.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }
}

//=== OverlayPanel ========================================================

/// Portfolio or education panel.
pub struct OverlayPanel {
    view: ViewKind,
    inbox: StateInbox,
    enter_inbox: StateInbox,
    visible: bool,
    opened_from_start: bool,
}

impl OverlayPanel {
    pub fn new(view: ViewKind, states: &mut GameStateManager) -> Self {
        Self {
            view,
            enter_inbox: states.subscribe(Phase::Enter, &[view.state()]),
            inbox: states.subscribe(Phase::Exit, &[view.state()]),
            visible: false,
            opened_from_start: false,
        }
    }

    pub fn update(&mut self) {
        for event in self.enter_inbox.drain() {
            self.visible = true;
            self.opened_from_start = event.previous_state == GameState::GameStartScreen;
        }
        if self.inbox.drain().count() > 0 {
            self.visible = false;
        }
    }

    /// Leaves the panel: back through the camera pan, or straight to the
    /// start screen when it was opened from there.
    pub fn close(&mut self, states: &mut GameStateManager) -> bool {
        let target = if self.opened_from_start {
            GameState::GameStartScreen
        } else {
            GameState::CameraTransitionExit
        };
        states.set_state(target)
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::TransitionTable;

    fn table() -> TransitionTable {
        TransitionTable::standard()
            .allow(GameState::PortfolioView, &[GameState::GameStartScreen])
            .allow(GameState::GameReset, &[GameState::GameStartScreen])
    }

    //--- StartScreen ------------------------------------------------------

    #[test]
    fn start_screen_hides_when_loading_begins() {
        let mut states = GameStateManager::with_table(table());
        let mut screen = StartScreen::new(&mut states);
        assert!(screen.is_visible());

        assert!(screen.start(&mut states));
        assert!(!screen.is_visible());
        assert_eq!(states.current(), GameState::Loading);
    }

    #[test]
    fn reset_returns_to_start_screen() {
        let table = table().allow(GameState::PortfolioView, &[GameState::GameReset]);
        let mut states = GameStateManager::starting_in(GameState::PortfolioView, table);
        let mut screen = StartScreen::new(&mut states);
        assert!(!screen.is_visible());

        assert!(states.set_state(GameState::GameReset));
        screen.update(&mut states);
        assert_eq!(states.current(), GameState::GameStartScreen);
        screen.update(&mut states);
        assert!(screen.is_visible());
    }

    //--- LoadingScreen ----------------------------------------------------

    #[test]
    fn loading_screen_hides_after_delay() {
        let mut screen = LoadingScreen::new();
        screen.show();

        let mut progress = LoadingProgress::new(2);
        progress.complete_one();
        screen.set_progress(&progress);
        assert_eq!(screen.percent(), 50.0);

        progress.complete_one();
        screen.set_progress(&progress);
        screen.update(0.4);
        assert!(screen.is_visible());
        screen.update(0.2);
        assert!(!screen.is_visible());
    }

    //--- OverlayPanel -----------------------------------------------------

    #[test]
    fn panel_opened_from_start_returns_there() {
        let mut states = GameStateManager::with_table(table());
        let mut panel = OverlayPanel::new(ViewKind::Portfolio, &mut states);

        assert!(states.set_state(GameState::PortfolioView));
        panel.update();
        assert!(panel.is_visible());

        assert!(panel.close(&mut states));
        panel.update();
        assert_eq!(states.current(), GameState::GameStartScreen);
        assert!(!panel.is_visible());
    }

    #[test]
    fn panel_reached_by_camera_closes_through_camera() {
        let mut states = GameStateManager::starting_in(GameState::CameraTransitionEnter, table());
        let mut panel = OverlayPanel::new(ViewKind::Education, &mut states);

        assert!(states.set_state(GameState::EducationView));
        panel.update();
        assert!(panel.close(&mut states));
        assert_eq!(states.current(), GameState::CameraTransitionExit);
    }
}
