//! Dice pools and the wildcard counting rule

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A player's private pool of dice
///
/// The pool's size shrinks and grows as rounds resolve, but never exceeds
/// the fixed `capacity` it was created with. Values are faces in 1..=6 and
/// only change when the pool is rolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    values: SmallVec<[u8; 5]>,
    capacity: usize,
}

impl DicePool {
    /// Create a full pool of `capacity` dice, all showing 1 until rolled
    pub fn new(capacity: usize) -> Self {
        DicePool {
            values: smallvec::smallvec![1; capacity],
            capacity,
        }
    }

    /// Build a pool with exact contents for scenario setup
    ///
    /// Faces are clamped into 1..=6 and values beyond `capacity` dropped, so
    /// test fixtures cannot construct an unrepresentable pool.
    pub fn from_values(values: &[u8], capacity: usize) -> Self {
        DicePool {
            values: values.iter().take(capacity).map(|v| (*v).clamp(1, 6)).collect(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Redraw every die in the pool, keeping its current size
    pub fn roll(&mut self, rng: &mut impl Rng) {
        for value in self.values.iter_mut() {
            *value = rng.gen_range(1..=6);
        }
    }

    /// Remove one die; an empty pool stays empty
    pub fn lose_one(&mut self) {
        self.values.pop();
    }

    /// Add one die, capped at capacity
    ///
    /// The new die carries a placeholder face until the next roll. Pools are
    /// only rolled at round start and gains happen at round end, so the
    /// placeholder is never counted.
    pub fn gain_one(&mut self) {
        if self.values.len() < self.capacity {
            self.values.push(1);
        }
    }

    /// Count dice supporting a claim on `face`, applying the wildcard rule
    ///
    /// Dice showing 1 are wild and count toward any other face. A claim on
    /// face 1 itself counts only exact 1s.
    pub fn count_matching(&self, face: u8) -> u32 {
        self.values
            .iter()
            .filter(|&&v| v == face || (face != 1 && v == 1))
            .count() as u32
    }

    /// Values in ascending order, for showing a cup to its owner
    pub fn sorted(&self) -> SmallVec<[u8; 5]> {
        let mut copy = self.values.clone();
        copy.sort_unstable();
        copy
    }
}
