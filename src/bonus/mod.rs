//! One-shot consumable bonus actions
//!
//! Bonuses are purchased outside the engine and granted to an account. During
//! a match each human may spend at most one of each kind; spending goes
//! through a [`BonusStore`] so an external inventory stays authoritative.

pub mod store;
pub mod wallet;

pub use store::{BonusStore, MemoryBonusStore};
pub use wallet::{BonusSlot, BonusWallet};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two bonus kinds a human can spend during a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Reroll the invoker's own dice pool
    Reroll,
    /// Reveal one live bot's dice to the invoker
    Peek,
}

impl BonusKind {
    /// Stable inventory key used by stores
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::Reroll => "reroll",
            BonusKind::Peek => "peek",
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusKind::Reroll => write!(f, "REROLL"),
            BonusKind::Peek => write!(f, "PEEK"),
        }
    }
}
