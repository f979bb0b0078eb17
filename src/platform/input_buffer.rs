//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store between the platform callbacks and the channel.
//
//   discrete    key and button edges, order kept, consecutive duplicates
//               dropped
//   continuous  stick positions, latest value per axis (see InputEvent's
//               axis-only equality)
//
// Drained on RedrawRequested; an empty frame sends nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(64),
            continuous: HashSet::with_capacity(8),
        }
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Replaces any earlier value for the same axis.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Routes an event to the right half of the buffer.
    pub(crate) fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::GamepadAxisMoved { .. } => self.push_continuous(event),
            InputEvent::Unidentified => {}
            _ => self.push_discrete(event),
        }
    }

    /// Takes the frame's events, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{GamepadAxis, KeyCode};

    fn stick_x(value: f32) -> InputEvent {
        InputEvent::GamepadAxisMoved { axis: GamepadAxis::LeftStickX, value }
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyW));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyW));
        buffer.push(InputEvent::KeyUp(KeyCode::KeyW));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyW));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn stick_keeps_latest_value() {
        let mut buffer = InputBuffer::new();
        buffer.push(stick_x(0.1));
        buffer.push(stick_x(0.9));

        let (discrete, continuous) = buffer.drain().unwrap_or_default();
        assert!(discrete.is_empty());
        assert_eq!(continuous.len(), 1);
        assert!(matches!(continuous[0], InputEvent::GamepadAxisMoved { value, .. } if value == 0.9));
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push(InputEvent::KeyDown(KeyCode::KeyE));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
