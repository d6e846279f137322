//! Match loop implementation
//!
//! Manages the round cycle, turn order, and challenge resolution

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all format! allocations that are a major performance bottleneck.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.log_normal(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::bonus::{BonusKind, BonusStore};
use crate::core::Bid;
use crate::game::controller::{GameStateView, PlayerAction, PlayerController};
use crate::game::rules::{resolve_doubt, resolve_exact, ChallengeKind, ChallengeOutcome};
use crate::game::GameState;
use crate::{PerudoError, Result};
use rand::Rng;
use std::fmt;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only match outcome
    Minimal = 1,
    /// Normal - rounds, turns, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions and state changes
    Verbose = 3,
}

/// Result of running a match to completion
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Winning seat (None if the round limit cut the match short)
    pub winner: Option<usize>,
    /// Total number of rounds played
    pub rounds_played: u32,
    /// Reason the match ended
    pub end_reason: MatchEndReason,
}

/// Reason the match ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEndReason {
    /// Exactly one seat still held dice
    LastStanding,
    /// Match reached the maximum round limit
    RoundLimit,
}

/// What the loop does after dispatching one action
enum TurnFlow {
    /// Move to the next live seat
    Advance,
    /// Same seat acts again (rejected input, or a bonus which is free)
    Repeat,
    /// A challenge resolved and the round is over
    RoundOver(ChallengeOutcome),
}

/// Why a bonus request was turned down
///
/// The checks run in a fixed order and the first failure wins, so the
/// message the player sees always names the earliest unmet condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BonusDenied {
    NotHuman,
    NoAliveBots,
    NotAvailable(BonusKind),
    InvalidPeekTarget,
    TargetNotAliveBot,
    StoreDenied(BonusKind),
}

impl fmt::Display for BonusDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusDenied::NotHuman => write!(f, "Only humans can use bonuses."),
            BonusDenied::NoAliveBots => write!(f, "No alive bots to peek."),
            BonusDenied::NotAvailable(kind) => write!(
                f,
                "{} not available (0 in inventory or already used this match).",
                kind
            ),
            BonusDenied::InvalidPeekTarget => write!(f, "Invalid peek target."),
            BonusDenied::TargetNotAliveBot => write!(f, "You can peek only an alive bot."),
            BonusDenied::StoreDenied(kind) => {
                write!(f, "{} not available in store (inventory desync).", kind)
            }
        }
    }
}

/// Match loop manager
///
/// Handles round progression, turn order, and win condition checking
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Durable bonus inventory, consulted before any bonus takes effect
    store: &'a mut dyn BonusStore,
    /// Maximum rounds before cutting the match short
    max_rounds: u32,
    /// Round counter for the loop
    rounds_elapsed: u32,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    /// Create a new match loop for the given game state and bonus store
    pub fn new(game: &'a mut GameState, store: &'a mut dyn BonusStore) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop {
            game,
            store,
            max_rounds: 1000, // Default maximum rounds
            rounds_elapsed: 0,
            verbosity,
        }
    }

    /// Set maximum rounds before cutting the match short
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set verbosity level for output
    ///
    /// This sets the verbosity on both the game loop and the game's centralized logger,
    /// which is accessed by controllers via GameStateView.
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run a match to completion
    ///
    /// `controllers` must hold one controller per seat, in seating order.
    /// The first round's opener is drawn from the shared RNG stream; every
    /// later round is opened by the seat the previous resolution recorded,
    /// and that seat acts first.
    pub fn run_match(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<MatchResult> {
        if self.game.players.len() < 2 {
            return Err(PerudoError::InvalidAction(
                "Match requires at least 2 seats".to_string(),
            ));
        }
        if controllers.len() != self.game.players.len() {
            return Err(PerudoError::InvalidAction(format!(
                "Match requires one controller per seat ({} seats, {} controllers)",
                self.game.players.len(),
                controllers.len()
            )));
        }

        log_if_verbose!(self, "=== PERUDO (Liar's Dice) ===");

        let mut opener = {
            let mut rng = self.game.rng.borrow_mut();
            rng.gen_range(0..self.game.players.len())
        };

        while self.game.alive_count() > 1 && self.rounds_elapsed < self.max_rounds {
            let outcome = self.run_round(opener, controllers)?;
            self.rounds_elapsed += 1;

            // The recorded opener acts first next round. If the round just
            // eliminated that seat, the next live seat after it opens.
            opener = if self.game.players[outcome.next_opener].is_alive() {
                outcome.next_opener
            } else {
                self.game.next_alive_index(outcome.next_opener)
            };
        }

        let result = self.build_result();
        self.announce_winner(&result);
        self.notify_match_end(controllers, result.winner);
        Ok(result)
    }

    /// Run a single round from fresh rolls to a resolved challenge
    ///
    /// Returns the outcome of the challenge that ended the round. Within the
    /// round the seat only advances on an accepted bid; rejected input and
    /// bonus use leave the turn where it was.
    fn run_round(
        &mut self,
        opener: usize,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<ChallengeOutcome> {
        self.game.begin_round();

        log_if_verbose!(self, "--- New Round ---");
        self.show_human_dice();

        let mut current = opener;
        loop {
            self.log_turn_banner(current);

            let action = {
                let view = GameStateView::new(self.game, current);
                controllers[current].choose_action(&view)?
            };

            match self.dispatch(current, action)? {
                TurnFlow::Advance => current = self.game.next_alive_index(current),
                TurnFlow::Repeat => {}
                TurnFlow::RoundOver(outcome) => return Ok(outcome),
            }
        }
    }

    /// Apply one action from the seat whose turn it is
    fn dispatch(&mut self, seat: usize, action: PlayerAction) -> Result<TurnFlow> {
        match action {
            PlayerAction::Bid(bid) => Ok(self.apply_bid(seat, bid)),
            PlayerAction::Liar => self.apply_challenge(seat, ChallengeKind::Doubt),
            PlayerAction::Exact => self.apply_challenge(seat, ChallengeKind::Exact),
            PlayerAction::UseBonus { kind, target } => {
                if let Err(denied) = self.try_bonus(seat, kind, target) {
                    log_if_verbose!(self, "{}", denied);
                }
                Ok(TurnFlow::Repeat)
            }
        }
    }

    /// Accept, coerce, or reject a bid against the standing one
    ///
    /// A human whose bid does not escalate is told so and asked again. A bot
    /// in the same position is coerced to the minimal legal raise so the
    /// round always makes progress.
    fn apply_bid(&mut self, seat: usize, bid: Bid) -> TurnFlow {
        let accepted = match self.game.round.current_bid() {
            Some(current) if !bid.is_higher_than(&current) => {
                if self.game.players[seat].is_bot() {
                    Some(current.next_minimum())
                } else {
                    log_if_verbose!(self, "Invalid bid. Must be higher than current bid.");
                    None
                }
            }
            _ => Some(bid),
        };

        match accepted {
            Some(bid) => {
                self.game.round.set_bid(bid, seat);
                log_if_verbose!(self, "{} bids: {}", self.game.players[seat].name, bid);
                TurnFlow::Advance
            }
            None => TurnFlow::Repeat,
        }
    }

    /// Resolve a challenge, or bounce it when no bid stands yet
    fn apply_challenge(&mut self, seat: usize, kind: ChallengeKind) -> Result<TurnFlow> {
        if self.game.round.current_bid().is_none() {
            log_if_verbose!(self, "You can't call before the first bid.");
            return Ok(TurnFlow::Repeat);
        }
        let outcome = match kind {
            ChallengeKind::Doubt => resolve_doubt(self.game, seat)?,
            ChallengeKind::Exact => resolve_exact(self.game, seat)?,
        };
        Ok(TurnFlow::RoundOver(outcome))
    }

    /// Validate and execute a bonus request
    ///
    /// Validation order: actor must be human, peek needs a live bot on the
    /// table, the wallet must hold an unspent charge, the peek target must
    /// be a live bot, and finally the durable store must agree to consume a
    /// charge. Only then is the wallet debited and the effect applied. A
    /// store that refuses despite a willing wallet is a desync and the store
    /// wins.
    fn try_bonus(
        &mut self,
        seat: usize,
        kind: BonusKind,
        target: Option<usize>,
    ) -> std::result::Result<(), BonusDenied> {
        if !self.game.players[seat].is_human() {
            return Err(BonusDenied::NotHuman);
        }
        if kind == BonusKind::Peek && !self.game.has_alive_bots() {
            return Err(BonusDenied::NoAliveBots);
        }

        let wallet = self.game.players[seat]
            .wallet()
            .ok_or(BonusDenied::NotHuman)?;
        if !wallet.can_use(kind) {
            return Err(BonusDenied::NotAvailable(kind));
        }
        let account = wallet.account().clone();

        let peek_target = if kind == BonusKind::Peek {
            let t = target.ok_or(BonusDenied::InvalidPeekTarget)?;
            if t >= self.game.players.len() {
                return Err(BonusDenied::InvalidPeekTarget);
            }
            let candidate = &self.game.players[t];
            if !candidate.is_alive() || !candidate.is_bot() {
                return Err(BonusDenied::TargetNotAliveBot);
            }
            Some(t)
        } else {
            None
        };

        if !self.store.consume_one(&account, kind) {
            return Err(BonusDenied::StoreDenied(kind));
        }

        if let Some(wallet) = self.game.players[seat].wallet_mut() {
            wallet.debit_local(kind);
            wallet.mark_used(kind);
        }

        match kind {
            BonusKind::Reroll => self.apply_reroll(seat),
            BonusKind::Peek => {
                if let Some(t) = peek_target {
                    self.apply_peek(seat, t);
                }
            }
        }
        Ok(())
    }

    /// Redraw the seat's whole pool from the shared stream
    fn apply_reroll(&mut self, seat: usize) {
        {
            let mut rng = self.game.rng.borrow_mut();
            self.game.players[seat].pool.roll(&mut *rng);
        }
        log_if_verbose!(
            self,
            "{} used REROLL. New dice: {:?}",
            self.game.players[seat].name,
            self.game.players[seat].pool.sorted()
        );
    }

    /// Reveal the target bot's pool to the table log
    fn apply_peek(&self, seat: usize, target: usize) {
        log_if_verbose!(self, "{} used PEEK.", self.game.players[seat].name);
        log_if_verbose!(
            self,
            "Peek {} dice: {:?}",
            self.game.players[target].name,
            self.game.players[target].pool.sorted()
        );
    }

    /// Show each live human their fresh roll at the top of the round
    fn show_human_dice(&self) {
        for player in &self.game.players {
            if player.is_alive() && player.is_human() {
                log_if_verbose!(self, "{} dice: {:?}", player.name, player.pool.sorted());
            }
        }
    }

    fn log_turn_banner(&self, seat: usize) {
        let player = &self.game.players[seat];
        log_if_verbose!(self, "Turn: {} (dice: {})", player.name, player.pool.len());
        if let Some(bid) = self.game.round.current_bid() {
            log_if_verbose!(self, "Current bid: {}", bid);
        } else {
            log_if_verbose!(self, "Current bid: none");
        }
    }

    fn build_result(&self) -> MatchResult {
        let alive = self.game.alive_indexes();
        if alive.len() == 1 {
            MatchResult {
                winner: Some(alive[0]),
                rounds_played: self.rounds_elapsed,
                end_reason: MatchEndReason::LastStanding,
            }
        } else {
            MatchResult {
                winner: None,
                rounds_played: self.rounds_elapsed,
                end_reason: MatchEndReason::RoundLimit,
            }
        }
    }

    fn announce_winner(&self, result: &MatchResult) {
        let name = match result.winner {
            Some(seat) => self.game.players[seat].name.as_str(),
            None => "nobody",
        };
        self.log_minimal(&format!("Winner: {}", name));
    }

    /// Notify every controller that the match has ended
    ///
    /// Calls the `on_match_end` callback for each controller with its view
    /// of the final state and whether its seat won.
    fn notify_match_end(
        &self,
        controllers: &mut [Box<dyn PlayerController>],
        winner: Option<usize>,
    ) {
        for (seat, controller) in controllers.iter_mut().enumerate() {
            let view = GameStateView::new(self.game, seat);
            controller.on_match_end(&view, winner == Some(seat));
        }
    }

    // === Logging Helpers ===

    /// Log a message at Normal verbosity level
    /// Most match events use this level
    fn log_normal(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Normal {
            self.game.logger.normal(message);
        }
    }

    /// Log a message at Minimal verbosity level
    /// Used for major match events like outcomes
    fn log_minimal(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Minimal {
            self.game.logger.minimal(message);
        }
    }
}
