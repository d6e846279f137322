//! Challenge resolution
//!
//! The two ways a round ends: doubting the standing bid ("liar") or calling
//! it exactly right. Both reveal all live pools, compare the claim against
//! the actual wildcard count, move exactly one die, and pick the opener of
//! the next round.

use crate::core::Bid;
use crate::error::{PerudoError, Result};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// Which challenge ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeKind {
    Doubt,
    Exact,
}

/// The die movement a resolution decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// This seat forfeits one die
    LostDie(usize),
    /// This seat gains one die (exact call that hit, capped at capacity)
    GainedDie(usize),
}

/// Everything a resolution decided, for logging and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub kind: ChallengeKind,
    /// The bid that was challenged
    pub bid: Bid,
    /// Actual number of matching dice across live pools
    pub actual: u32,
    pub verdict: Verdict,
    /// Seat that opens the next round
    pub next_opener: usize,
}

/// Resolve a doubt ("liar") challenge from `caller` against the standing bid
///
/// If at least the claimed quantity is on the table the bid was true and the
/// caller loses a die; otherwise the bidder loses one. The loser opens the
/// next round.
pub fn resolve_doubt(game: &mut GameState, caller: usize) -> Result<ChallengeOutcome> {
    let (bid, bidder) = standing_bid(game)?;
    let actual = game.count_matches_total(bid);

    game.logger.normal(">>> LIAR called!");
    game.logger
        .normal(&format!("Bid: {} | Actual matches: {}", bid, actual));

    let bid_true = actual >= bid.quantity();
    let loser = if bid_true {
        game.logger.normal("Bid is TRUE. Caller loses 1 die.");
        caller
    } else {
        game.logger.normal("Bid is FALSE. Bidder loses 1 die.");
        bidder
    };

    game.players[loser].pool.lose_one();
    game.round.set_next_opener(loser);
    log_dice_counts(game);

    Ok(ChallengeOutcome {
        kind: ChallengeKind::Doubt,
        bid,
        actual,
        verdict: Verdict::LostDie(loser),
        next_opener: loser,
    })
}

/// Resolve an exact challenge from `caller` against the standing bid
///
/// Hitting the count exactly rewards the bidder with a die (never beyond
/// pool capacity); missing costs the caller a die. Either way the caller
/// opens the next round.
pub fn resolve_exact(game: &mut GameState, caller: usize) -> Result<ChallengeOutcome> {
    let (bid, bidder) = standing_bid(game)?;
    let actual = game.count_matches_total(bid);

    game.logger.normal(">>> EXACT called!");
    game.logger
        .normal(&format!("Bid: {} | Actual matches: {}", bid, actual));

    let verdict = if actual == bid.quantity() {
        game.logger
            .normal("Exactly correct! Bidder gains 1 die (up to max).");
        game.players[bidder].pool.gain_one();
        Verdict::GainedDie(bidder)
    } else {
        game.logger.normal("Not exact. Exact-caller loses 1 die.");
        game.players[caller].pool.lose_one();
        Verdict::LostDie(caller)
    };

    game.round.set_next_opener(caller);
    log_dice_counts(game);

    Ok(ChallengeOutcome {
        kind: ChallengeKind::Exact,
        bid,
        actual,
        verdict,
        next_opener: caller,
    })
}

fn standing_bid(game: &GameState) -> Result<(Bid, usize)> {
    match (game.round.current_bid(), game.round.last_bidder()) {
        (Some(bid), Some(bidder)) => Ok((bid, bidder)),
        _ => Err(PerudoError::NoStandingBid(
            "cannot resolve a challenge before the first bid".to_string(),
        )),
    }
}

fn log_dice_counts(game: &GameState) {
    game.logger.normal("Dice counts:");
    for player in &game.players {
        game.logger
            .normal(&format!(" - {}: {}", player.name, player.pool.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DicePool, Player};

    fn fixed_state(pools: &[&[u8]]) -> GameState {
        let players = pools
            .iter()
            .enumerate()
            .map(|(i, values)| {
                let mut p = Player::new_bot(format!("Bot{}", i + 1), 5);
                p.pool = DicePool::from_values(values, 5);
                p
            })
            .collect();
        GameState::new(players)
    }

    #[test]
    fn test_doubt_true_bid_costs_caller() {
        // 4s on the table: 2 natural + 1 wild = 3, bid of 3 holds
        let mut state = fixed_state(&[&[4, 4, 2], &[1, 5, 3]]);
        state.round.set_bid(Bid::new(3, 4).unwrap(), 0);

        let outcome = resolve_doubt(&mut state, 1).unwrap();

        assert_eq!(outcome.actual, 3);
        assert_eq!(outcome.verdict, Verdict::LostDie(1));
        assert_eq!(outcome.next_opener, 1);
        assert_eq!(state.players[0].pool.len(), 3);
        assert_eq!(state.players[1].pool.len(), 2);
        assert_eq!(state.round.next_opener(), Some(1));
    }

    #[test]
    fn test_doubt_false_bid_costs_bidder() {
        let mut state = fixed_state(&[&[2, 2, 3], &[5, 6, 3]]);
        state.round.set_bid(Bid::new(4, 4).unwrap(), 0);

        let outcome = resolve_doubt(&mut state, 1).unwrap();

        assert_eq!(outcome.actual, 0);
        assert_eq!(outcome.verdict, Verdict::LostDie(0));
        assert_eq!(outcome.next_opener, 0);
        assert_eq!(state.players[0].pool.len(), 2);
        assert_eq!(state.players[1].pool.len(), 3);
    }

    #[test]
    fn test_doubt_moves_exactly_one_die() {
        let mut state = fixed_state(&[&[4, 4, 2], &[1, 5, 3]]);
        let before = state.total_dice_in_play();
        state.round.set_bid(Bid::new(2, 4).unwrap(), 0);

        resolve_doubt(&mut state, 1).unwrap();
        assert_eq!(state.total_dice_in_play(), before - 1);
    }

    #[test]
    fn test_doubt_overbid_boundary_is_true() {
        // actual == quantity counts as the bid being true
        let mut state = fixed_state(&[&[4, 4], &[1, 5]]);
        state.round.set_bid(Bid::new(3, 4).unwrap(), 0);

        let outcome = resolve_doubt(&mut state, 1).unwrap();
        assert_eq!(outcome.verdict, Verdict::LostDie(1));
    }

    #[test]
    fn test_exact_hit_rewards_bidder_and_caller_opens() {
        // 4s: one natural at seat 0 plus the wild 1 at seat 1
        let mut state = fixed_state(&[&[4, 6], &[1, 5, 2]]);
        state.round.set_bid(Bid::new(2, 4).unwrap(), 0);

        let outcome = resolve_exact(&mut state, 1).unwrap();

        assert_eq!(outcome.actual, 2);
        assert_eq!(outcome.verdict, Verdict::GainedDie(0));
        assert_eq!(outcome.next_opener, 1);
        assert_eq!(state.players[0].pool.len(), 3);
        assert_eq!(state.players[1].pool.len(), 3);
    }

    #[test]
    fn test_exact_hit_respects_capacity() {
        let mut state = fixed_state(&[&[4, 4, 2, 3, 5], &[1, 5]]);
        state.round.set_bid(Bid::new(3, 4).unwrap(), 0);

        let outcome = resolve_exact(&mut state, 1).unwrap();

        assert_eq!(outcome.verdict, Verdict::GainedDie(0));
        // Full pool stays at capacity
        assert_eq!(state.players[0].pool.len(), 5);
    }

    #[test]
    fn test_exact_miss_costs_caller() {
        let mut state = fixed_state(&[&[4, 4, 2], &[6, 5, 3]]);
        state.round.set_bid(Bid::new(3, 4).unwrap(), 0);

        let outcome = resolve_exact(&mut state, 1).unwrap();

        assert_eq!(outcome.actual, 2);
        assert_eq!(outcome.verdict, Verdict::LostDie(1));
        assert_eq!(outcome.next_opener, 1);
        assert_eq!(state.players[1].pool.len(), 2);
    }

    #[test]
    fn test_resolution_can_eliminate() {
        let mut state = fixed_state(&[&[2], &[5, 5]]);
        state.round.set_bid(Bid::new(5, 6).unwrap(), 0);

        resolve_doubt(&mut state, 1).unwrap();

        assert!(!state.players[0].is_alive());
        assert_eq!(state.alive_count(), 1);
    }

    #[test]
    fn test_challenge_without_bid_errors() {
        let mut state = fixed_state(&[&[2, 3], &[5, 5]]);

        assert!(matches!(
            resolve_doubt(&mut state, 0),
            Err(PerudoError::NoStandingBid(_))
        ));
        assert!(matches!(
            resolve_exact(&mut state, 0),
            Err(PerudoError::NoStandingBid(_))
        ));
    }

    #[test]
    fn test_outcome_is_logged() {
        let mut state = fixed_state(&[&[4, 4, 2], &[1, 5, 3]]);
        state.logger.enable_capture();
        state.round.set_bid(Bid::new(3, 4).unwrap(), 0);

        resolve_doubt(&mut state, 1).unwrap();

        let logs = state.logger.logs();
        assert!(logs.iter().any(|l| l.message == ">>> LIAR called!"));
        assert!(logs
            .iter()
            .any(|l| l.message == "Bid: 3 x 4's | Actual matches: 3"));
        assert!(logs.iter().any(|l| l.message == "Dice counts:"));
    }
}
