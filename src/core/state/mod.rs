//=========================================================================
// State System
//=========================================================================
//
// Game-mode finite-state machine and its typed event dispatch.
//
// Architecture:
//   GameStateManager
//     ├─ table: TransitionTable          (fixed at construction)
//     ├─ current / previous: GameState
//     └─ listeners: (Phase, GameState) → [callback]
//
// Subsystems either register callbacks directly or take a `StateInbox`
// and drain it during their own update.
//
//=========================================================================

//=== Module Declarations =================================================

mod game_state;
mod manager;

//=== Public API ==========================================================

pub use game_state::{GameState, StateChangeEvent, TransitionTable, ViewKind};
pub use manager::{GameStateManager, ListenerId, Phase, StateInbox};
