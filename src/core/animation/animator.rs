//=========================================================================
// Animator
//=========================================================================
//
// Per-entity clip registry with at-most-one playing clip.
//
// Architecture:
//   library (clip names from the model)
//     └─ load(name, duration, once) → ClipAction
//   play(name) → current
//   update(dt) → current.advance() → [ClipEvent] → on(name, event) callback
//
// Switching policy:
//   unknown clip                   → no-op
//   same clip, still running       → no-op (no restart)
//   same clip, finished            → restart
//   different clip                 → stop previous once, start new from 0
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::clip::{ClipAction, ClipEvent, LoopMode};
use crate::core::assets::ClipInfo;

//=== Types ===============================================================

type ClipCallback = Box<dyn FnMut(ClipEvent)>;

//=== Animator ============================================================

pub struct Animator {
    library: HashSet<String>,
    actions: HashMap<String, ClipAction>,
    listeners: HashMap<String, HashMap<ClipEvent, ClipCallback>>,
    current: Option<String>,
    pending: Vec<ClipEvent>,
}

impl Animator {
    //--- Construction -----------------------------------------------------

    /// Wraps a model's clip library. Nothing is playable until loaded.
    pub fn new(library: &[ClipInfo]) -> Self {
        Self {
            library: library.iter().map(|clip| clip.name.clone()).collect(),
            actions: HashMap::new(),
            listeners: HashMap::new(),
            current: None,
            pending: Vec::with_capacity(4),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Configures a clip from the library.
    ///
    /// `once = true` plays a single cycle and holds the last frame;
    /// `once = false` repeats forever. Reloading a clip resets its
    /// listener table. Returns `false` if the model has no such clip.
    pub fn load(&mut self, name: &str, duration: f32, once: bool) -> bool {
        if !self.library.contains(name) {
            warn!(target: "animation", "Clip '{}' not found in model, skipping", name);
            return false;
        }

        let mode = if once { LoopMode::Once } else { LoopMode::Repeat };
        self.actions.insert(name.to_string(), ClipAction::new(duration, mode));
        self.listeners.insert(name.to_string(), HashMap::new());

        if self.current.as_deref() == Some(name) {
            self.current = None;
        }

        debug!(target: "animation", "Loaded clip '{}' ({:.2}s, {:?})", name, duration, mode);
        true
    }

    /// Registers the callback for `(name, event)`, replacing any earlier one.
    pub fn on<F>(&mut self, name: &str, event: ClipEvent, callback: F)
    where
        F: FnMut(ClipEvent) + 'static,
    {
        match self.listeners.get_mut(name) {
            Some(table) => {
                table.insert(event, Box::new(callback));
            }
            None => {
                warn!(target: "animation", "Listener for unloaded clip '{}' ignored", name);
            }
        }
    }

    //--- Playback ---------------------------------------------------------

    pub fn play(&mut self, name: &str) {
        if !self.actions.contains_key(name) {
            return;
        }

        if self.current.as_deref() == Some(name) {
            if let Some(action) = self.actions.get_mut(name) {
                if !action.is_running() {
                    action.play();
                }
            }
            return;
        }

        if let Some(previous) = self.current.take() {
            if let Some(action) = self.actions.get_mut(&previous) {
                action.stop();
            }
        }

        if let Some(action) = self.actions.get_mut(name) {
            trace!(target: "animation", "Playing clip '{}'", name);
            action.play();
            self.current = Some(name.to_string());
        }
    }

    /// Advances the current clip and dispatches its lifecycle events.
    pub fn update(&mut self, dt: f32) {
        let Some(name) = self.current.as_deref() else {
            return;
        };
        let Some(action) = self.actions.get_mut(name) else {
            return;
        };

        self.pending.clear();
        action.advance(dt, &mut self.pending);

        if self.pending.is_empty() {
            return;
        }

        if let Some(table) = self.listeners.get_mut(name) {
            for event in &self.pending {
                if let Some(callback) = table.get_mut(event) {
                    callback(*event);
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Name of the clip selected last by `play`.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn action(&self, name: &str) -> Option<&ClipAction> {
        self.actions.get(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
            && self.actions.get(name).is_some_and(ClipAction::is_running)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
