//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform thread and the core thread.
//
// Components:
// - `interface`: `PlatformEvent`, the cross-thread message
// - `event_collector`: core-side draining into per-frame input batches
//
// The platform error type lives in `crate::error` with the other errors.
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
