//! Heuristic bot controller
//!
//! Expectation-based strategy: estimate how many dice plausibly support the
//! standing bid from the bot's own cup plus the table average, then doubt
//! clearly inflated bids, occasionally call an exact match, and otherwise
//! raise by the minimum step.
//!
//! This controller does not own an RNG - it draws from the RNG shared
//! through GameStateView to ensure deterministic replay of seeded matches.

use crate::error::Result;
use crate::game::controller::{GameStateView, PlayerAction, PlayerController};
use rand::Rng;

/// Bot strategy driven by expected-value thresholds
///
/// With `d` unseen dice, about `d/3` support a non-1 face (natural plus
/// wild) and `d/6` support face 1. A standing bid further than
/// `doubt_margin` above that estimate gets doubted; one within
/// `exact_window` of it gets an exact call at `exact_chance` probability.
pub struct HeuristicController {
    /// How far above the expected count a bid must be to get doubted
    doubt_margin: f64,
    /// Half-width of the band around the expected count for exact calls
    exact_window: f64,
    /// Probability of calling exact when inside the window
    exact_chance: f64,
    /// Probability of opening on the wild face instead of 2..=6
    wild_face_chance: f64,
}

impl HeuristicController {
    pub fn new() -> Self {
        HeuristicController {
            doubt_margin: 1.6,
            exact_window: 0.7,
            exact_chance: 0.15,
            wild_face_chance: 0.10,
        }
    }

    /// Override the exact-call probability (tests pin this to 0.0 or 1.0)
    pub fn with_exact_chance(mut self, chance: f64) -> Self {
        self.exact_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Override the probability of opening on face 1
    pub fn with_wild_face_chance(mut self, chance: f64) -> Self {
        self.wild_face_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn expected_total(&self, view: &GameStateView, face: u8) -> f64 {
        let my_dice = view.my_dice_count() as u32;
        let others = view.total_dice_in_play().saturating_sub(my_dice);
        let expected_others = if face == 1 {
            others as f64 / 6.0
        } else {
            others as f64 / 3.0
        };
        view.my_matches(face) as f64 + expected_others
    }
}

impl Default for HeuristicController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController for HeuristicController {
    fn choose_action(&mut self, view: &GameStateView) -> Result<PlayerAction> {
        let name = view.player_name(view.seat()).unwrap_or("").to_string();

        let Some(current) = view.current_bid() else {
            // Open small: one die of a random face, rarely the wild face
            let face = {
                let mut rng = view.rng();
                if rng.gen_bool(self.wild_face_chance) {
                    1
                } else {
                    rng.gen_range(2..=6)
                }
            };
            let bid = crate::core::Bid::new(1, face)?;
            view.logger()
                .controller_choice(&format!("{} opens with {}", name, bid));
            return Ok(PlayerAction::Bid(bid));
        };

        let expected = self.expected_total(view, current.face());
        let quantity = current.quantity() as f64;

        if quantity > expected + self.doubt_margin {
            view.logger()
                .controller_choice(&format!("{} calls LIAR", name));
            return Ok(PlayerAction::Liar);
        }

        if (quantity - expected).abs() < self.exact_window && view.rng().gen_bool(self.exact_chance)
        {
            view.logger()
                .controller_choice(&format!("{} calls EXACT", name));
            return Ok(PlayerAction::Exact);
        }

        let raise = current.next_minimum();
        view.logger()
            .controller_choice(&format!("{} raises to {}", name, raise));
        Ok(PlayerAction::Bid(raise))
    }
}
