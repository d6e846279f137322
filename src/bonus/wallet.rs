//! Per-match snapshot of a human's bonus entitlements

use crate::bonus::BonusKind;
use crate::core::AccountId;
use serde::{Deserialize, Serialize};

/// Local view of one bonus kind
///
/// `remaining` mirrors the store inventory loaded at match start;
/// `used_this_match` is the once-per-match latch. Both must hold for the
/// bonus to be offered, and they are tracked separately on purpose: a fresh
/// inventory next match resets neither from the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSlot {
    pub remaining: u32,
    pub used_this_match: bool,
}

impl BonusSlot {
    pub fn new(remaining: u32) -> Self {
        BonusSlot {
            remaining,
            used_this_match: false,
        }
    }

    /// Both conditions must hold; either alone is not enough
    pub fn usable(&self) -> bool {
        self.remaining > 0 && !self.used_this_match
    }
}

/// A human player's bonus wallet for the duration of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusWallet {
    account: AccountId,
    reroll: BonusSlot,
    peek: BonusSlot,
}

impl BonusWallet {
    pub fn new(account: AccountId, reroll_count: u32, peek_count: u32) -> Self {
        BonusWallet {
            account,
            reroll: BonusSlot::new(reroll_count),
            peek: BonusSlot::new(peek_count),
        }
    }

    /// Wallet with no entitlements at all; every `can_use` is false
    pub fn empty(account: AccountId) -> Self {
        BonusWallet::new(account, 0, 0)
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn slot(&self, kind: BonusKind) -> &BonusSlot {
        match kind {
            BonusKind::Reroll => &self.reroll,
            BonusKind::Peek => &self.peek,
        }
    }

    fn slot_mut(&mut self, kind: BonusKind) -> &mut BonusSlot {
        match kind {
            BonusKind::Reroll => &mut self.reroll,
            BonusKind::Peek => &mut self.peek,
        }
    }

    pub fn can_use(&self, kind: BonusKind) -> bool {
        self.slot(kind).usable()
    }

    pub fn remaining(&self, kind: BonusKind) -> u32 {
        self.slot(kind).remaining
    }

    /// Decrement the local mirror, floored at zero
    ///
    /// Called only after the store accepted the spend; the store count is
    /// authoritative, this just keeps menus honest.
    pub fn debit_local(&mut self, kind: BonusKind) {
        let slot = self.slot_mut(kind);
        slot.remaining = slot.remaining.saturating_sub(1);
    }

    pub fn mark_used(&mut self, kind: BonusKind) {
        self.slot_mut(kind).used_this_match = true;
    }
}
