//! Core game types and values

pub mod bid;
pub mod dice;
pub mod player;
pub mod types;

pub use bid::Bid;
pub use dice::DicePool;
pub use player::{Player, Seat};
pub use types::{AccountId, PlayerName};
