//! Main game state structure

use crate::core::{Bid, Player};
use crate::game::GameLogger;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cell::RefCell;

/// The standing bid of the round in progress
///
/// Holds only what a round accumulates: the latest bid, who made it, and the
/// opener the resolution picked for the next round. Validation of escalation
/// happens in the match loop; `set_bid` replaces unconditionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    current_bid: Option<Bid>,
    last_bidder: Option<usize>,
    next_opener: Option<usize>,
}

impl RoundState {
    pub fn new() -> Self {
        RoundState::default()
    }

    pub fn current_bid(&self) -> Option<Bid> {
        self.current_bid
    }

    /// Seat of the player who made the standing bid
    pub fn last_bidder(&self) -> Option<usize> {
        self.last_bidder
    }

    /// Seat chosen by resolution to open the next round
    pub fn next_opener(&self) -> Option<usize> {
        self.next_opener
    }

    /// Record a new standing bid; any previous bid is replaced
    pub fn set_bid(&mut self, bid: Bid, bidder: usize) {
        self.current_bid = Some(bid);
        self.last_bidder = Some(bidder);
    }

    /// Set once per round, by the resolution functions
    pub(crate) fn set_next_opener(&mut self, seat: usize) {
        self.next_opener = Some(seat);
    }
}

/// Complete game state
///
/// Central structure holding the seats, the round in progress, the shared
/// RNG, and the logger. Cheap to clone for test setups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All players in the match (Vec for stable seating order, small count)
    pub players: Vec<Player>,

    /// The round in progress
    pub round: RoundState,

    /// Random number generator for gameplay (serializable for deterministic replay)
    ///
    /// The single randomness stream for the whole match: dice rolls, the
    /// first-round opener draw, and heuristic decisions all pull from here,
    /// which makes a seeded match bit-for-bit reproducible.
    ///
    /// Wrapped in RefCell to allow interior mutability - this lets us get mutable
    /// access to the RNG even when GameState is borrowed immutably (e.g., for GameStateView).
    pub rng: RefCell<ChaCha12Rng>,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        GameState {
            players,
            round: RoundState::new(),
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)), // Default seed, reseeded at match setup
            logger: GameLogger::new(),
        }
    }

    /// Set the RNG seed for deterministic gameplay
    ///
    /// Call during match setup; the seed governs every random decision made
    /// by the engine and its controllers.
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Start a fresh round: clear the bid ledger and reroll every live pool
    ///
    /// Eliminated seats keep their empty pools and are not rolled.
    pub fn begin_round(&mut self) {
        self.round = RoundState::new();
        let mut rng = self.rng.borrow_mut();
        for player in &mut self.players {
            if player.is_alive() {
                player.pool.roll(&mut *rng);
            }
        }
    }

    /// Total dice still held across all live seats
    pub fn total_dice_in_play(&self) -> u32 {
        self.players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.pool.len() as u32)
            .sum()
    }

    /// Count dice across all live pools supporting `bid`, wildcard rule applied
    pub fn count_matches_total(&self, bid: Bid) -> u32 {
        self.players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.pool.count_matching(bid.face()))
            .sum()
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    pub fn alive_indexes(&self) -> SmallVec<[usize; 8]> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// Seats holding live bots, the only legal peek targets
    pub fn alive_bot_indexes(&self) -> SmallVec<[usize; 8]> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && p.is_bot())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_alive_bots(&self) -> bool {
        self.players.iter().any(|p| p.is_alive() && p.is_bot())
    }

    /// Next live seat after `from`, wrapping around the table
    ///
    /// Scans at most one full lap; returns `from` itself when no other live
    /// seat exists (the last-standing case).
    pub fn next_alive_index(&self, from: usize) -> usize {
        let n = self.players.len();
        let mut i = from;
        for _ in 0..n {
            i = (i + 1) % n;
            if self.players[i].is_alive() {
                return i;
            }
        }
        from
    }
}
