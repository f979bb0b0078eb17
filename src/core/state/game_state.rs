//=========================================================================
// Game State Types
//=========================================================================
//
// The closed set of game modes, the transition event value and the
// adjacency table that decides which mode changes are legal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Deserialize;

//=== GameState ===========================================================

/// Every mode the game can be in. Exactly one is current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Loading,
    MainMenu,
    Playing,
    Paused,
    Dialogue,
    CameraTransitionEnter,
    CameraTransitionExit,
    PortfolioView,
    EducationView,
    GameStartScreen,
    GameReset,
}

impl GameState {
    /// All states, in declaration order.
    pub const ALL: [GameState; 11] = [
        GameState::Loading,
        GameState::MainMenu,
        GameState::Playing,
        GameState::Paused,
        GameState::Dialogue,
        GameState::CameraTransitionEnter,
        GameState::CameraTransitionExit,
        GameState::PortfolioView,
        GameState::EducationView,
        GameState::GameStartScreen,
        GameState::GameReset,
    ];

    /// Upper snake-case name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            GameState::Loading => "LOADING",
            GameState::MainMenu => "MAIN_MENU",
            GameState::Playing => "PLAYING",
            GameState::Paused => "PAUSED",
            GameState::Dialogue => "DIALOGUE",
            GameState::CameraTransitionEnter => "CAMERA_TRANSITION_ENTER",
            GameState::CameraTransitionExit => "CAMERA_TRANSITION_EXIT",
            GameState::PortfolioView => "PORTFOLIO_VIEW",
            GameState::EducationView => "EDUCATION_VIEW",
            GameState::GameStartScreen => "GAME_START_SCREEN",
            GameState::GameReset => "GAME_RESET",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== ViewKind ============================================================

/// Which overlay a camera pan ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum ViewKind {
    #[default]
    Portfolio,
    Education,
}

impl ViewKind {
    /// The overlay state this view lands in.
    pub const fn state(self) -> GameState {
        match self {
            ViewKind::Portfolio => GameState::PortfolioView,
            ViewKind::Education => GameState::EducationView,
        }
    }
}

//=== StateChangeEvent ====================================================

/// Value handed to every listener of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChangeEvent {
    pub new_state: GameState,
    pub previous_state: GameState,
}

//=== TransitionTable =====================================================

/// Adjacency table `from → {to}`.
///
/// Anything not listed is rejected. The table is handed to the
/// [`GameStateManager`](super::GameStateManager) at construction and never
/// changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    edges: HashMap<GameState, HashSet<GameState>>,
}

impl TransitionTable {
    /// An empty table; every transition is rejected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped policy graph.
    pub fn standard() -> Self {
        use GameState::*;

        Self::empty()
            .allow(Playing, &[Dialogue, Paused, CameraTransitionEnter, MainMenu])
            .allow(Dialogue, &[Playing, CameraTransitionEnter])
            .allow(CameraTransitionEnter, &[Playing, PortfolioView, EducationView])
            .allow(PortfolioView, &[CameraTransitionExit])
            .allow(EducationView, &[CameraTransitionExit])
            .allow(CameraTransitionExit, &[Playing])
            .allow(GameStartScreen, &[Loading, PortfolioView, EducationView])
    }

    /// Adds `from → to` edges for every target.
    pub fn allow(mut self, from: GameState, to: &[GameState]) -> Self {
        self.edges.entry(from).or_default().extend(to.iter().copied());
        self
    }

    /// Pure adjacency check.
    pub fn contains(&self, from: GameState, to: GameState) -> bool {
        self.edges.get(&from).is_some_and(|targets| targets.contains(&to))
    }

    /// Iterates the legal targets of `from` (unordered).
    pub fn targets(&self, from: GameState) -> impl Iterator<Item = GameState> + '_ {
        self.edges.get(&from).into_iter().flatten().copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
