//! Scripted player controller for testing
//!
//! This controller follows a predetermined script of actions, useful for
//! driving exact round scenarios deterministically.

use crate::core::Bid;
use crate::error::Result;
use crate::game::controller::{GameStateView, PlayerAction, PlayerController};

/// A controller that follows a predetermined sequence of actions
///
/// When the script is exhausted it falls back to a terminating policy:
/// open with the smallest bid if none stands, otherwise call liar. Scripted
/// rounds therefore always come to a resolution instead of bidding forever.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    actions: Vec<PlayerAction>,
    current_step: usize,
}

impl ScriptedController {
    /// Create a new scripted controller with a sequence of actions
    pub fn new(actions: Vec<PlayerAction>) -> Self {
        ScriptedController {
            actions,
            current_step: 0,
        }
    }

    /// How many scripted actions have been consumed
    pub fn steps_taken(&self) -> usize {
        self.current_step
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_step >= self.actions.len()
    }
}

impl PlayerController for ScriptedController {
    fn choose_action(&mut self, view: &GameStateView) -> Result<PlayerAction> {
        if let Some(action) = self.actions.get(self.current_step) {
            self.current_step += 1;
            return Ok(*action);
        }

        // Script exhausted: force the round toward resolution
        match view.current_bid() {
            None => Ok(PlayerAction::Bid(Bid::new(1, 2)?)),
            Some(_) => Ok(PlayerAction::Liar),
        }
    }
}
