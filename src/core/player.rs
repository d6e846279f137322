//! Player representation

use crate::bonus::BonusWallet;
use crate::core::{DicePool, PlayerName};
use serde::{Deserialize, Serialize};

/// Who occupies a seat: a human with a bonus wallet, or a bot
///
/// Bonus entitlements only exist for humans, so the wallet lives inside the
/// variant rather than as an `Option` on every player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Seat {
    Human { wallet: BonusWallet },
    Bot,
}

/// Represents a player in the game
///
/// Identity is positional: a player is addressed by its index in the match's
/// seating order, which never changes. A player with an empty pool is
/// eliminated and stays seated but skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player name
    pub name: PlayerName,

    /// Human or bot occupant
    pub seat: Seat,

    /// Private pool of dice
    pub pool: DicePool,
}

impl Player {
    pub fn new_human(name: impl Into<PlayerName>, wallet: BonusWallet, dice_capacity: usize) -> Self {
        Player {
            name: name.into(),
            seat: Seat::Human { wallet },
            pool: DicePool::new(dice_capacity),
        }
    }

    pub fn new_bot(name: impl Into<PlayerName>, dice_capacity: usize) -> Self {
        Player {
            name: name.into(),
            seat: Seat::Bot,
            pool: DicePool::new(dice_capacity),
        }
    }

    /// A player stays in the match while it has at least one die
    pub fn is_alive(&self) -> bool {
        !self.pool.is_empty()
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.seat, Seat::Bot)
    }

    pub fn is_human(&self) -> bool {
        matches!(self.seat, Seat::Human { .. })
    }

    /// The bonus wallet, for humans only
    pub fn wallet(&self) -> Option<&BonusWallet> {
        match &self.seat {
            Seat::Human { wallet } => Some(wallet),
            Seat::Bot => None,
        }
    }

    pub fn wallet_mut(&mut self) -> Option<&mut BonusWallet> {
        match &mut self.seat {
            Seat::Human { wallet } => Some(wallet),
            Seat::Bot => None,
        }
    }
}
