//! Bid values and the escalation order over them

use crate::error::{PerudoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A public claim that at least `quantity` dice across all pools show `face`
///
/// Bids are immutable once constructed; escalation produces a new value.
/// The total order is quantity-major with face breaking ties, which the
/// derived `Ord` gives us from the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bid {
    quantity: u32,
    face: u8,
}

impl Bid {
    /// Create a bid, rejecting quantity < 1 or a face outside 1..=6
    pub fn new(quantity: u32, face: u8) -> Result<Self> {
        if quantity < 1 || !(1..=6).contains(&face) {
            return Err(PerudoError::InvalidBid { quantity, face });
        }
        Ok(Bid { quantity, face })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn face(&self) -> u8 {
        self.face
    }

    /// Strict escalation order: more dice wins, same dice compares faces
    pub fn is_higher_than(&self, other: &Bid) -> bool {
        self > other
    }

    /// The smallest bid strictly higher than this one
    ///
    /// Bumps the face while possible, otherwise rolls over to one more die
    /// of face 1. Every legal raise is `>=` this value.
    pub fn next_minimum(&self) -> Bid {
        if self.face < 6 {
            Bid {
                quantity: self.quantity,
                face: self.face + 1,
            }
        } else {
            Bid {
                quantity: self.quantity + 1,
                face: 1,
            }
        }
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}'s", self.quantity, self.face)
    }
}
