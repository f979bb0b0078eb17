//=========================================================================
// Animation
//=========================================================================
//
// Clip playback and the clip-event bridge used to sync gameplay (e.g.
// footsteps) to animation phase.
//
//=========================================================================

//=== Module Declarations =================================================

mod animator;
mod clip;

//=== Public API ==========================================================

pub use animator::Animator;
pub use clip::{ClipAction, ClipEvent, LoopMode};
