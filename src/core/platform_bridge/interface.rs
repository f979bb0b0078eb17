//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// The only message type that crosses from the platform thread to the
// core thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// One frame of input. Empty frames are never sent.
    Inputs {
        /// Key and button edges, in arrival order.
        discrete: Vec<InputEvent>,
        /// Latest stick positions, one per axis.
        continuous: Vec<InputEvent>,
    },

    /// Window closed; the core thread should stop.
    WindowClosed,
}
