//! Player controller trait and game state view
//!
//! This module defines the interface between the match engine and player
//! controllers (bot strategy, human menu, test scripts). The engine calls
//! the seat's controller when it must act, and the controller inspects a
//! read-only view of the game state to make its choice.

use crate::bonus::{BonusKind, BonusWallet};
use crate::core::Bid;
use crate::error::Result;
use crate::game::{GameLogger, GameState};
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;
use std::cell::RefMut;

/// Available actions a player can take on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Place a bid, replacing the standing one if it escalates
    Bid(Bid),

    /// Challenge the standing bid as an overstatement
    Liar,

    /// Claim the standing bid is exactly right
    Exact,

    /// Spend a one-shot bonus; `target` is the peeked seat (peek only)
    UseBonus {
        kind: BonusKind,
        target: Option<usize>,
    },
}

/// Read-only view of game state for controllers
///
/// Scoped to one seat: it exposes that seat's private dice and wallet, the
/// public table state everyone can see, and the shared RNG so strategies
/// draw from the match's single randomness stream.
pub struct GameStateView<'a> {
    game: &'a GameState,
    seat: usize,
}

impl<'a> GameStateView<'a> {
    /// Create a new view of the game state from one seat's perspective
    pub fn new(game: &'a GameState, seat: usize) -> Self {
        GameStateView { game, seat }
    }

    /// Seat index this view is for
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// This seat's own dice, hidden from everyone else
    pub fn my_dice(&self) -> &[u8] {
        self.game.players[self.seat].pool.values()
    }

    /// This seat's own dice in display order
    pub fn my_dice_sorted(&self) -> SmallVec<[u8; 5]> {
        self.game.players[self.seat].pool.sorted()
    }

    pub fn my_dice_count(&self) -> usize {
        self.game.players[self.seat].pool.len()
    }

    /// Own-pool matches for a face, wildcard rule applied
    pub fn my_matches(&self, face: u8) -> u32 {
        self.game.players[self.seat].pool.count_matching(face)
    }

    /// This seat's bonus wallet, if a human sits here
    pub fn wallet(&self) -> Option<&BonusWallet> {
        self.game.players[self.seat].wallet()
    }

    /// The bid currently on the table
    pub fn current_bid(&self) -> Option<Bid> {
        self.game.round.current_bid()
    }

    /// Total dice held across all live seats (public knowledge)
    pub fn total_dice_in_play(&self) -> u32 {
        self.game.total_dice_in_play()
    }

    /// Public dice count of any seat
    pub fn dice_count_of(&self, seat: usize) -> usize {
        self.game
            .players
            .get(seat)
            .map(|p| p.pool.len())
            .unwrap_or(0)
    }

    pub fn player_name(&self, seat: usize) -> Option<&str> {
        self.game.players.get(seat).map(|p| p.name.as_str())
    }

    /// Seats holding live bots (legal peek targets)
    pub fn alive_bot_indexes(&self) -> SmallVec<[usize; 8]> {
        self.game.alive_bot_indexes()
    }

    pub fn has_alive_bots(&self) -> bool {
        self.game.has_alive_bots()
    }

    /// The match's shared RNG stream
    ///
    /// Strategies draw their randomness here so a seeded match replays
    /// identically. The borrow must not be held across another view call
    /// that rolls dice.
    pub fn rng(&self) -> RefMut<'a, ChaCha12Rng> {
        self.game.rng.borrow_mut()
    }

    /// The centralized logger, for prompts and choice records
    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this trait to create bot strategies or connect a human input
/// source. The match engine calls `choose_action` each time the seat must
/// act; illegal choices are pushed back by the engine, which re-solicits
/// the same seat.
pub trait PlayerController {
    /// Choose this seat's next action
    ///
    /// Returning an error aborts the match (used for real I/O failure, not
    /// for illegal moves).
    fn choose_action(&mut self, view: &GameStateView) -> Result<PlayerAction>;

    /// Called when the match ends (for cleanup/logging)
    fn on_match_end(&mut self, _view: &GameStateView, _won: bool) {}
}
