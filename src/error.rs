//! Error types for the Perudo engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerudoError {
    #[error("Invalid bid: quantity {quantity}, face {face}")]
    InvalidBid { quantity: u32, face: u8 },

    #[error("No standing bid: {0}")]
    NoStandingBid(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PerudoError>;
