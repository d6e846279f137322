//! Bonus inventory stores
//!
//! The authoritative inventory lives outside the engine (the original system
//! keeps it in a database). The engine only ever asks two questions, captured
//! by the [`BonusStore`] trait, and always believes the store's answer over
//! its own local counts.

use crate::bonus::BonusKind;
use crate::core::AccountId;
use rustc_hash::FxHashMap;

/// External inventory of purchased bonuses
pub trait BonusStore {
    /// Current inventory count for one account and kind
    fn remaining_count(&self, account: &AccountId, kind: BonusKind) -> u32;

    /// Atomically spend one entitlement
    ///
    /// Returns false when nothing was spent (no row, zero quantity). A false
    /// here overrides any local count claiming otherwise.
    fn consume_one(&mut self, account: &AccountId, kind: BonusKind) -> bool;
}

/// In-memory store for the CLI and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryBonusStore {
    inventory: FxHashMap<(AccountId, BonusKind), u32>,
}

impl MemoryBonusStore {
    pub fn new() -> Self {
        MemoryBonusStore::default()
    }

    /// Add entitlements to an account's inventory
    pub fn grant(&mut self, account: AccountId, kind: BonusKind, quantity: u32) {
        *self.inventory.entry((account, kind)).or_insert(0) += quantity;
    }
}

impl BonusStore for MemoryBonusStore {
    fn remaining_count(&self, account: &AccountId, kind: BonusKind) -> u32 {
        self.inventory
            .get(&(account.clone(), kind))
            .copied()
            .unwrap_or(0)
    }

    fn consume_one(&mut self, account: &AccountId, kind: BonusKind) -> bool {
        match self.inventory.get_mut(&(account.clone(), kind)) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_decrements_until_empty() {
        let acct = AccountId::new("acct-1");
        let mut store = MemoryBonusStore::new();
        store.grant(acct.clone(), BonusKind::Reroll, 2);

        assert!(store.consume_one(&acct, BonusKind::Reroll));
        assert_eq!(store.remaining_count(&acct, BonusKind::Reroll), 1);
        assert!(store.consume_one(&acct, BonusKind::Reroll));
        assert!(!store.consume_one(&acct, BonusKind::Reroll));
        assert_eq!(store.remaining_count(&acct, BonusKind::Reroll), 0);
    }

    #[test]
    fn test_unknown_account_denied() {
        let mut store = MemoryBonusStore::new();
        assert_eq!(store.remaining_count(&AccountId::new("nobody"), BonusKind::Peek), 0);
        assert!(!store.consume_one(&AccountId::new("nobody"), BonusKind::Peek));
    }

    #[test]
    fn test_kinds_tracked_separately() {
        let acct = AccountId::new("acct-1");
        let mut store = MemoryBonusStore::new();
        store.grant(acct.clone(), BonusKind::Reroll, 1);

        assert!(!store.consume_one(&acct, BonusKind::Peek));
        assert!(store.consume_one(&acct, BonusKind::Reroll));
    }
}
