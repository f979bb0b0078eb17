//=========================================================================
// Interactive
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::context::GameContext;

//=== Interactive =========================================================

/// Something the player can walk up to and use.
pub trait Interactive {
    fn position(&self) -> Vec3;

    /// Whether a player standing at `from` is close enough.
    fn can_interact(&self, from: Vec3) -> bool;

    fn interact(&mut self, ctx: &mut GameContext);
}

/// Interactable shared between its owner and the player's registry.
pub type SharedInteractive = Rc<RefCell<dyn Interactive>>;

/// Index of the closest candidate `from` can interact with.
pub fn nearest_in_range(candidates: &[SharedInteractive], from: Vec3) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let candidate = candidate.borrow();
            candidate
                .can_interact(from)
                .then(|| (index, candidate.position().distance_squared(from)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

//=========================================================================
// Unit Tests
//=========================================================================
