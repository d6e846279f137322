//! Perudo (Liar's Dice) - console match engine
//!
//! A Perudo engine with pluggable player controllers, a wildcard-aware
//! bid ledger, and a consumable bonus inventory backed by a durable store.

pub mod bonus;
pub mod core;
pub mod game;
pub mod sim;
pub mod error;

pub use error::{PerudoError, Result};
