//=========================================================================
// Game State Manager
//=========================================================================
//
// Validated finite-state machine over `GameState`.
//
// Flow:
//   set_state(target)
//     ├─ table.contains(current, target)?  no → warn, return false
//     ├─ previous = current; current = target
//     ├─ Exit(previous) listeners   (registration order)
//     └─ Enter(target) listeners    (registration order)
//
// Listeners receive only the event value and cannot reach the manager,
// so validation, mutation and dispatch of one transition can never
// interleave with another.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, TryIter};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{GameState, StateChangeEvent, TransitionTable};

//=== Phase ===============================================================

/// Which side of a transition a listener observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

//=== ListenerId ==========================================================

/// Token returned by registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&StateChangeEvent)>;

//=== GameStateManager ====================================================

/// Owns the current/previous state and the enter/exit listener registry.
///
/// Created once by the composition root and handed to subsystems through
/// [`GameContext`](crate::world::GameContext).
pub struct GameStateManager {
    current: GameState,
    previous: GameState,
    table: TransitionTable,
    listeners: HashMap<(Phase, GameState), Vec<(ListenerId, Listener)>>,
    next_listener: u64,
}

impl GameStateManager {
    //--- Construction -----------------------------------------------------

    /// Manager with the standard table, starting on the start screen.
    pub fn new() -> Self {
        Self::with_table(TransitionTable::standard())
    }

    /// Manager with a custom table, starting on the start screen.
    pub fn with_table(table: TransitionTable) -> Self {
        Self::starting_in(GameState::GameStartScreen, table)
    }

    /// Manager with a custom table and initial state.
    pub fn starting_in(initial: GameState, table: TransitionTable) -> Self {
        Self {
            current: initial,
            previous: initial,
            table,
            listeners: HashMap::new(),
            next_listener: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn previous(&self) -> GameState {
        self.previous
    }

    pub fn is(&self, state: GameState) -> bool {
        self.current == state
    }

    /// Pure predicate over the adjacency table.
    pub fn can_transition_to(&self, from: GameState, to: GameState) -> bool {
        self.table.contains(from, to)
    }

    //--- Transitions ------------------------------------------------------

    /// Attempts `current → target`.
    ///
    /// Returns `false` without touching any state if the edge is not in the
    /// table. On success, exit listeners of the old state run before enter
    /// listeners of the new one, all before this call returns.
    pub fn set_state(&mut self, target: GameState) -> bool {
        if !self.can_transition_to(self.current, target) {
            warn!(
                target: "state",
                "Invalid state transition: {} -> {}",
                self.current,
                target
            );
            return false;
        }

        self.previous = self.current;
        self.current = target;

        let event = StateChangeEvent {
            new_state: target,
            previous_state: self.previous,
        };

        debug!(target: "state", "{} -> {}", event.previous_state, event.new_state);

        self.dispatch(Phase::Exit, event.previous_state, &event);
        self.dispatch(Phase::Enter, event.new_state, &event);

        true
    }

    //--- Subscription -----------------------------------------------------

    /// Registers a callback for entering `state`.
    pub fn on_state_enter<F>(&mut self, state: GameState, callback: F) -> ListenerId
    where
        F: FnMut(&StateChangeEvent) + 'static,
    {
        self.register(Phase::Enter, state, Box::new(callback))
    }

    /// Registers a callback for leaving `state`.
    pub fn on_state_exit<F>(&mut self, state: GameState, callback: F) -> ListenerId
    where
        F: FnMut(&StateChangeEvent) + 'static,
    {
        self.register(Phase::Exit, state, Box::new(callback))
    }

    /// Removes a listener. Returns `false` if the id was unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        for entries in self.listeners.values_mut() {
            if let Some(pos) = entries.iter().position(|(existing, _)| *existing == id) {
                let _removed = entries.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of listeners registered for one (phase, state) pair.
    pub fn listener_count(&self, phase: Phase, state: GameState) -> usize {
        self.listeners.get(&(phase, state)).map_or(0, Vec::len)
    }

    /// Forwards the given transitions into a channel the caller drains later.
    ///
    /// This is how subsystems that own their own state (camera, music,
    /// overlays, dialogue) react to transitions on their next update
    /// without the manager waiting for them.
    pub fn subscribe(&mut self, phase: Phase, states: &[GameState]) -> StateInbox {
        let (sender, receiver) = unbounded();
        let ids = states
            .iter()
            .map(|&state| {
                let sender = sender.clone();
                let forward = move |event: &StateChangeEvent| {
                    // Receiver dropped means the subsystem is gone.
                    let _ = sender.send(*event);
                };
                self.register(phase, state, Box::new(forward))
            })
            .collect();

        StateInbox { receiver, ids }
    }

    //--- Internal Helpers -------------------------------------------------

    fn register(&mut self, phase: Phase, state: GameState, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry((phase, state)).or_default().push((id, listener));
        id
    }

    fn dispatch(&mut self, phase: Phase, state: GameState, event: &StateChangeEvent) {
        if let Some(entries) = self.listeners.get_mut(&(phase, state)) {
            for (_, listener) in entries.iter_mut() {
                listener(event);
            }
        }
    }
}

impl Default for GameStateManager {
    fn default() -> Self {
        Self::new()
    }
}

//=== StateInbox ==========================================================

/// Receiving end of [`GameStateManager::subscribe`].
pub struct StateInbox {
    receiver: Receiver<StateChangeEvent>,
    ids: Vec<ListenerId>,
}

impl StateInbox {
    /// Drains every event delivered since the last call, oldest first.
    pub fn drain(&self) -> TryIter<'_, StateChangeEvent> {
        self.receiver.try_iter()
    }

    /// Listener ids backing this inbox, for unsubscribing.
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.ids
    }

    /// Unregisters every backing listener.
    pub fn close(self, manager: &mut GameStateManager) {
        for id in self.ids {
            manager.remove_listener(id);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
